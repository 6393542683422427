//! `propiedades` table mapping.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    Agent, Attributes, Location, NewProperty, OfferingType, Property, PropertyPatch,
};

/// Column set sent on insert and update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyColumns {
    #[serde(rename = "titulo", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precio", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub offering: Option<OfferingType>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "comuna", skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(rename = "ciudad", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "region", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename = "dormitorios", skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(rename = "banos", skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(rename = "metros_cuadrados", skip_serializing_if = "Option::is_none")]
    pub floor_area: Option<f64>,
    #[serde(rename = "estacionamientos", skip_serializing_if = "Option::is_none")]
    pub parking_spaces: Option<u32>,
    #[serde(rename = "amoblado", skip_serializing_if = "Option::is_none")]
    pub furnished: Option<bool>,
    #[serde(rename = "amenidades", skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(rename = "imagenes", skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(rename = "fecha_disponible", skip_serializing_if = "Option::is_none")]
    pub available_from: Option<NaiveDate>,
    #[serde(rename = "garantia", skip_serializing_if = "Option::is_none")]
    pub deposit: Option<String>,
    #[serde(rename = "agente_nombre", skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(rename = "agente_telefono", skip_serializing_if = "Option::is_none")]
    pub agent_phone: Option<String>,
    #[serde(rename = "agente_email", skip_serializing_if = "Option::is_none")]
    pub agent_email: Option<String>,
    #[serde(rename = "fecha_actualizacion")]
    pub updated_at: DateTime<Utc>,
}

/// Row as returned by the backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyRow {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "tipo")]
    pub category: String,
    #[serde(rename = "estado")]
    pub offering: OfferingType,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "comuna", default)]
    pub district: Option<String>,
    #[serde(rename = "ciudad", default)]
    pub city: Option<String>,
    #[serde(rename = "region", default)]
    pub region: Option<String>,
    #[serde(rename = "dormitorios", default)]
    pub bedrooms: Option<u32>,
    #[serde(rename = "banos", default)]
    pub bathrooms: Option<u32>,
    #[serde(rename = "metros_cuadrados", default)]
    pub floor_area: Option<f64>,
    #[serde(rename = "estacionamientos", default)]
    pub parking_spaces: Option<u32>,
    #[serde(rename = "amoblado", default)]
    pub furnished: Option<bool>,
    #[serde(rename = "amenidades", default)]
    pub amenities: Option<Vec<String>>,
    #[serde(rename = "imagenes", default)]
    pub images: Option<Vec<String>>,
    #[serde(rename = "fecha_disponible", default)]
    pub available_from: Option<NaiveDate>,
    #[serde(rename = "garantia", default)]
    pub deposit: Option<String>,
    #[serde(rename = "agente_nombre", default)]
    pub agent_name: Option<String>,
    #[serde(rename = "agente_telefono", default)]
    pub agent_phone: Option<String>,
    #[serde(rename = "agente_email", default)]
    pub agent_email: Option<String>,
    #[serde(rename = "fecha_creacion")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "fecha_actualizacion")]
    pub updated_at: DateTime<Utc>,
}

/// Projection used for aggregate statistics
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyStatsRow {
    #[serde(rename = "estado")]
    pub offering: OfferingType,
    #[serde(rename = "tipo")]
    pub category: String,
    #[serde(rename = "precio")]
    pub price: f64,
}

impl PropertyStatsRow {
    pub const COLUMNS: &'static str = "estado,tipo,precio";
}

/// Flatten a new listing into a full insert row.
pub fn to_storage(new: &NewProperty, now: DateTime<Utc>) -> PropertyColumns {
    PropertyColumns {
        title: Some(new.title.clone()),
        description: new.description.clone(),
        price: Some(new.price),
        category: Some(new.category.clone()),
        offering: Some(new.offering),
        address: new.location.address.clone(),
        district: new.location.district.clone(),
        city: new.location.city.clone(),
        region: new.location.region.clone(),
        bedrooms: new.attributes.bedrooms,
        bathrooms: new.attributes.bathrooms,
        floor_area: new.attributes.floor_area,
        parking_spaces: new.attributes.parking_spaces,
        furnished: Some(new.attributes.furnished),
        amenities: Some(new.amenities.clone()),
        images: Some(new.images.clone()),
        available_from: new.available_from,
        deposit: new.deposit.clone(),
        agent_name: new.agent.name.clone(),
        agent_phone: new.agent.phone.clone(),
        agent_email: new.agent.email.clone(),
        updated_at: now,
    }
}

/// Flatten a partial update. Only fields present in `patch` are written.
pub fn patch_to_storage(patch: &PropertyPatch, now: DateTime<Utc>) -> PropertyColumns {
    let location = patch.location.clone().unwrap_or_default();
    let attributes = patch.attributes.clone().unwrap_or_default();
    let agent = patch.agent.clone().unwrap_or_default();

    PropertyColumns {
        title: patch.title.clone(),
        description: patch.description.clone(),
        price: patch.price,
        category: patch.category.clone(),
        offering: patch.offering,
        address: location.address,
        district: location.district,
        city: location.city,
        region: location.region,
        bedrooms: attributes.bedrooms,
        bathrooms: attributes.bathrooms,
        floor_area: attributes.floor_area,
        parking_spaces: attributes.parking_spaces,
        furnished: attributes.furnished,
        amenities: patch.amenities.clone(),
        images: patch.images.clone(),
        available_from: patch.available_from,
        deposit: patch.deposit.clone(),
        agent_name: agent.name,
        agent_phone: agent.phone,
        agent_email: agent.email,
        updated_at: now,
    }
}

/// Rebuild the nested external record from a stored row.
pub fn to_external(row: PropertyRow) -> Property {
    Property {
        id: row.id,
        title: row.title,
        description: row.description,
        price: row.price,
        category: row.category,
        offering: row.offering,
        location: Location {
            address: row.address,
            district: row.district,
            city: row.city,
            region: row.region,
        },
        attributes: Attributes {
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            floor_area: row.floor_area,
            parking_spaces: row.parking_spaces,
            furnished: row.furnished.unwrap_or(false),
        },
        amenities: row.amenities.unwrap_or_default(),
        images: row.images.unwrap_or_default(),
        available_from: row.available_from,
        deposit: row.deposit,
        agent: Agent {
            name: row.agent_name,
            phone: row.agent_phone,
            email: row.agent_email,
        },
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}
