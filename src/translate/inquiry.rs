//! `consultas` table mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Inquiry, InquiryPatch, InquiryStatus, NewInquiry, Priority};

/// Column set sent on insert and update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InquiryColumns {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "tipo_servicio", skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(rename = "tipo_propiedad", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(rename = "ubicacion_preferida", skip_serializing_if = "Option::is_none")]
    pub preferred_location: Option<String>,
    #[serde(rename = "presupuesto_maximo", skip_serializing_if = "Option::is_none")]
    pub max_budget: Option<f64>,
    #[serde(rename = "dormitorios", skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(rename = "banos", skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(rename = "estacionamientos", skip_serializing_if = "Option::is_none")]
    pub parking_spaces: Option<u32>,
    #[serde(rename = "amenidades_deseadas", skip_serializing_if = "Option::is_none")]
    pub desired_amenities: Option<Vec<String>>,
    #[serde(rename = "credito_pre_aprobado", skip_serializing_if = "Option::is_none")]
    pub pre_approved_credit: Option<bool>,
    #[serde(rename = "monto_pre_aprobado", skip_serializing_if = "Option::is_none")]
    pub pre_approved_amount: Option<f64>,
    #[serde(rename = "plazo_busqueda", skip_serializing_if = "Option::is_none")]
    pub search_timeframe: Option<String>,
    #[serde(rename = "fecha_mudanza", skip_serializing_if = "Option::is_none")]
    pub move_in_date: Option<String>,
    #[serde(rename = "comentarios", skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<InquiryStatus>,
    #[serde(rename = "prioridad", skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(rename = "fecha_actualizacion")]
    pub updated_at: DateTime<Utc>,
}

/// Row as returned by the backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InquiryRow {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "tipo_servicio")]
    pub service_type: String,
    #[serde(rename = "tipo_propiedad", default)]
    pub property_type: Option<String>,
    #[serde(rename = "ubicacion_preferida", default)]
    pub preferred_location: Option<String>,
    #[serde(rename = "presupuesto_maximo", default)]
    pub max_budget: Option<f64>,
    #[serde(rename = "dormitorios", default)]
    pub bedrooms: Option<u32>,
    #[serde(rename = "banos", default)]
    pub bathrooms: Option<u32>,
    #[serde(rename = "estacionamientos", default)]
    pub parking_spaces: Option<u32>,
    #[serde(rename = "amenidades_deseadas", default)]
    pub desired_amenities: Option<Vec<String>>,
    #[serde(rename = "credito_pre_aprobado", default)]
    pub pre_approved_credit: Option<bool>,
    #[serde(rename = "monto_pre_aprobado", default)]
    pub pre_approved_amount: Option<f64>,
    #[serde(rename = "plazo_busqueda", default)]
    pub search_timeframe: Option<String>,
    #[serde(rename = "fecha_mudanza", default)]
    pub move_in_date: Option<String>,
    #[serde(rename = "comentarios", default)]
    pub comments: Option<String>,
    #[serde(rename = "estado")]
    pub status: InquiryStatus,
    #[serde(rename = "prioridad", default)]
    pub priority: Option<Priority>,
    #[serde(rename = "fecha_creacion")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "fecha_actualizacion")]
    pub updated_at: DateTime<Utc>,
}

/// Projection used for aggregate statistics
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InquiryStatsRow {
    #[serde(rename = "estado")]
    pub status: InquiryStatus,
    #[serde(rename = "tipo_servicio")]
    pub service_type: String,
    #[serde(rename = "prioridad", default)]
    pub priority: Option<Priority>,
    #[serde(rename = "fecha_creacion")]
    pub created_at: DateTime<Utc>,
}

impl InquiryStatsRow {
    pub const COLUMNS: &'static str = "estado,tipo_servicio,prioridad,fecha_creacion";
}

/// New inquiries are always written with status `nueva`.
pub fn to_storage(new: &NewInquiry, now: DateTime<Utc>) -> InquiryColumns {
    InquiryColumns {
        first_name: Some(new.first_name.clone()),
        last_name: Some(new.last_name.clone()),
        email: Some(new.email.clone()),
        phone: Some(new.phone.clone()),
        service_type: Some(new.service_type.clone()),
        property_type: new.property_type.clone(),
        preferred_location: new.preferred_location.clone(),
        max_budget: new.max_budget,
        bedrooms: new.bedrooms,
        bathrooms: new.bathrooms,
        parking_spaces: new.parking_spaces,
        desired_amenities: Some(new.desired_amenities.clone()),
        pre_approved_credit: new.pre_approved_credit,
        pre_approved_amount: new.pre_approved_amount,
        search_timeframe: new.search_timeframe.clone(),
        move_in_date: new.move_in_date.clone(),
        comments: new.comments.clone(),
        status: Some(InquiryStatus::New),
        priority: new.priority,
        updated_at: now,
    }
}

pub fn patch_to_storage(patch: &InquiryPatch, now: DateTime<Utc>) -> InquiryColumns {
    InquiryColumns {
        first_name: patch.first_name.clone(),
        last_name: patch.last_name.clone(),
        email: patch.email.clone(),
        phone: patch.phone.clone(),
        service_type: patch.service_type.clone(),
        property_type: patch.property_type.clone(),
        preferred_location: patch.preferred_location.clone(),
        max_budget: patch.max_budget,
        bedrooms: patch.bedrooms,
        bathrooms: patch.bathrooms,
        parking_spaces: patch.parking_spaces,
        desired_amenities: patch.desired_amenities.clone(),
        pre_approved_credit: patch.pre_approved_credit,
        pre_approved_amount: patch.pre_approved_amount,
        search_timeframe: patch.search_timeframe.clone(),
        move_in_date: patch.move_in_date.clone(),
        comments: patch.comments.clone(),
        status: patch.status.clone(),
        priority: patch.priority,
        updated_at: now,
    }
}

pub fn to_external(row: InquiryRow) -> Inquiry {
    Inquiry {
        id: row.id,
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        phone: row.phone,
        service_type: row.service_type,
        property_type: row.property_type,
        preferred_location: row.preferred_location,
        max_budget: row.max_budget,
        bedrooms: row.bedrooms,
        bathrooms: row.bathrooms,
        parking_spaces: row.parking_spaces,
        desired_amenities: row.desired_amenities.unwrap_or_default(),
        pre_approved_credit: row.pre_approved_credit,
        pre_approved_amount: row.pre_approved_amount,
        search_timeframe: row.search_timeframe,
        move_in_date: row.move_in_date,
        comments: row.comments,
        status: row.status,
        priority: row.priority,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}
