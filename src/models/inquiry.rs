//! Contact inquiry records.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{merge, merge_opt, present, ValidationError};

/// Fields a creation payload must carry
pub const REQUIRED_FIELDS: &[&str] = &["nombre", "apellido", "email", "telefono", "tipoServicio"];

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// Loose syntactic email check
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Follow-up state of an inquiry.
///
/// The set is open: values outside the known ones are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InquiryStatus {
    New,
    Pending,
    InProgress,
    Completed,
    Other(String),
}

impl InquiryStatus {
    pub fn as_str(&self) -> &str {
        match self {
            InquiryStatus::New => "nueva",
            InquiryStatus::Pending => "pendiente",
            InquiryStatus::InProgress => "en_proceso",
            InquiryStatus::Completed => "completada",
            InquiryStatus::Other(other) => other,
        }
    }
}

impl From<String> for InquiryStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "nueva" => InquiryStatus::New,
            "pendiente" => InquiryStatus::Pending,
            "en_proceso" => InquiryStatus::InProgress,
            "completada" => InquiryStatus::Completed,
            _ => InquiryStatus::Other(value),
        }
    }
}

impl From<InquiryStatus> for String {
    fn from(status: InquiryStatus) -> Self {
        match status {
            InquiryStatus::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Triage priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "baja")]
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "alta",
            Priority::Medium => "media",
            Priority::Low => "baja",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "alta" => Some(Priority::High),
            "media" => Some(Priority::Medium),
            "baja" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored contact inquiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "tipoServicio")]
    pub service_type: String,
    #[serde(rename = "tipoPropiedad", default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(rename = "ubicacionPreferida", default, skip_serializing_if = "Option::is_none")]
    pub preferred_location: Option<String>,
    #[serde(rename = "presupuestoMaximo", default, skip_serializing_if = "Option::is_none")]
    pub max_budget: Option<f64>,
    #[serde(rename = "dormitorios", default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(rename = "banos", default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(rename = "estacionamientos", default, skip_serializing_if = "Option::is_none")]
    pub parking_spaces: Option<u32>,
    #[serde(rename = "amenidadesDeseadas", default)]
    pub desired_amenities: Vec<String>,
    #[serde(rename = "creditoPreAprobado", default, skip_serializing_if = "Option::is_none")]
    pub pre_approved_credit: Option<bool>,
    #[serde(rename = "montoPreAprobado", default, skip_serializing_if = "Option::is_none")]
    pub pre_approved_amount: Option<f64>,
    #[serde(rename = "plazoBusqueda", default, skip_serializing_if = "Option::is_none")]
    pub search_timeframe: Option<String>,
    #[serde(rename = "fechaMudanza", default, skip_serializing_if = "Option::is_none")]
    pub move_in_date: Option<String>,
    #[serde(rename = "comentarios", default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(rename = "estado")]
    pub status: InquiryStatus,
    #[serde(rename = "prioridad", default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(rename = "fechaCreacion")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "fechaActualizacion")]
    pub updated_at: DateTime<Utc>,
}

/// A checked creation payload. Status is not client-controlled.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInquiry {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub service_type: String,
    pub property_type: Option<String>,
    pub preferred_location: Option<String>,
    pub max_budget: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub parking_spaces: Option<u32>,
    pub desired_amenities: Vec<String>,
    pub pre_approved_credit: Option<bool>,
    pub pre_approved_amount: Option<f64>,
    pub search_timeframe: Option<String>,
    pub move_in_date: Option<String>,
    pub comments: Option<String>,
    pub priority: Option<Priority>,
}

impl Inquiry {
    /// Materialize a new inquiry; every inquiry starts as [`InquiryStatus::New`].
    pub fn from_new(id: i64, new: NewInquiry, now: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            service_type: new.service_type,
            property_type: new.property_type,
            preferred_location: new.preferred_location,
            max_budget: new.max_budget,
            bedrooms: new.bedrooms,
            bathrooms: new.bathrooms,
            parking_spaces: new.parking_spaces,
            desired_amenities: new.desired_amenities,
            pre_approved_credit: new.pre_approved_credit,
            pre_approved_amount: new.pre_approved_amount,
            search_timeframe: new.search_timeframe,
            move_in_date: new.move_in_date,
            comments: new.comments,
            status: InquiryStatus::New,
            priority: new.priority,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_patch(&mut self, patch: InquiryPatch, now: DateTime<Utc>) {
        merge(&mut self.first_name, patch.first_name);
        merge(&mut self.last_name, patch.last_name);
        merge(&mut self.email, patch.email);
        merge(&mut self.phone, patch.phone);
        merge(&mut self.service_type, patch.service_type);
        merge_opt(&mut self.property_type, patch.property_type);
        merge_opt(&mut self.preferred_location, patch.preferred_location);
        merge_opt(&mut self.max_budget, patch.max_budget);
        merge_opt(&mut self.bedrooms, patch.bedrooms);
        merge_opt(&mut self.bathrooms, patch.bathrooms);
        merge_opt(&mut self.parking_spaces, patch.parking_spaces);
        merge(&mut self.desired_amenities, patch.desired_amenities);
        merge_opt(&mut self.pre_approved_credit, patch.pre_approved_credit);
        merge_opt(&mut self.pre_approved_amount, patch.pre_approved_amount);
        merge_opt(&mut self.search_timeframe, patch.search_timeframe);
        merge_opt(&mut self.move_in_date, patch.move_in_date);
        merge_opt(&mut self.comments, patch.comments);
        merge(&mut self.status, patch.status);
        merge_opt(&mut self.priority, patch.priority);
        self.updated_at = now;
    }
}

/// Raw creation body as received over HTTP
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InquiryDraft {
    #[serde(rename = "nombre", default)]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "tipoServicio", default)]
    pub service_type: Option<String>,
    #[serde(rename = "tipoPropiedad", default)]
    pub property_type: Option<String>,
    #[serde(rename = "ubicacionPreferida", default)]
    pub preferred_location: Option<String>,
    #[serde(rename = "presupuestoMaximo", default)]
    pub max_budget: Option<f64>,
    #[serde(rename = "dormitorios", default)]
    pub bedrooms: Option<u32>,
    #[serde(rename = "banos", default)]
    pub bathrooms: Option<u32>,
    #[serde(rename = "estacionamientos", default)]
    pub parking_spaces: Option<u32>,
    #[serde(rename = "amenidadesDeseadas", default)]
    pub desired_amenities: Option<Vec<String>>,
    #[serde(rename = "creditoPreAprobado", default)]
    pub pre_approved_credit: Option<bool>,
    #[serde(rename = "montoPreAprobado", default)]
    pub pre_approved_amount: Option<f64>,
    #[serde(rename = "plazoBusqueda", default)]
    pub search_timeframe: Option<String>,
    #[serde(rename = "fechaMudanza", default)]
    pub move_in_date: Option<String>,
    #[serde(rename = "comentarios", default)]
    pub comments: Option<String>,
    #[serde(rename = "prioridad", default)]
    pub priority: Option<Priority>,
}

impl InquiryDraft {
    pub fn validate(self) -> Result<NewInquiry, ValidationError> {
        let checks = [
            ("nombre", present(&self.first_name)),
            ("apellido", present(&self.last_name)),
            ("email", present(&self.email)),
            ("telefono", present(&self.phone)),
            ("tipoServicio", present(&self.service_type)),
        ];
        let missing: Vec<&'static str> = checks
            .iter()
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| *name)
            .collect();

        let (Some(first_name), Some(last_name), Some(email), Some(phone), Some(service_type)) = (
            self.first_name,
            self.last_name,
            self.email,
            self.phone,
            self.service_type,
        ) else {
            return Err(ValidationError::MissingFields {
                required: REQUIRED_FIELDS,
                missing,
            });
        };
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields {
                required: REQUIRED_FIELDS,
                missing,
            });
        }

        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail(email));
        }

        Ok(NewInquiry {
            first_name,
            last_name,
            email,
            phone,
            service_type,
            property_type: self.property_type,
            preferred_location: self.preferred_location,
            max_budget: self.max_budget,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            parking_spaces: self.parking_spaces,
            desired_amenities: self.desired_amenities.unwrap_or_default(),
            pre_approved_credit: self.pre_approved_credit,
            pre_approved_amount: self.pre_approved_amount,
            search_timeframe: self.search_timeframe,
            move_in_date: self.move_in_date,
            comments: self.comments,
            priority: self.priority,
        })
    }
}

/// Partial update body
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InquiryPatch {
    #[serde(rename = "nombre", default)]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "tipoServicio", default)]
    pub service_type: Option<String>,
    #[serde(rename = "tipoPropiedad", default)]
    pub property_type: Option<String>,
    #[serde(rename = "ubicacionPreferida", default)]
    pub preferred_location: Option<String>,
    #[serde(rename = "presupuestoMaximo", default)]
    pub max_budget: Option<f64>,
    #[serde(rename = "dormitorios", default)]
    pub bedrooms: Option<u32>,
    #[serde(rename = "banos", default)]
    pub bathrooms: Option<u32>,
    #[serde(rename = "estacionamientos", default)]
    pub parking_spaces: Option<u32>,
    #[serde(rename = "amenidadesDeseadas", default)]
    pub desired_amenities: Option<Vec<String>>,
    #[serde(rename = "creditoPreAprobado", default)]
    pub pre_approved_credit: Option<bool>,
    #[serde(rename = "montoPreAprobado", default)]
    pub pre_approved_amount: Option<f64>,
    #[serde(rename = "plazoBusqueda", default)]
    pub search_timeframe: Option<String>,
    #[serde(rename = "fechaMudanza", default)]
    pub move_in_date: Option<String>,
    #[serde(rename = "comentarios", default)]
    pub comments: Option<String>,
    #[serde(rename = "estado", default)]
    pub status: Option<InquiryStatus>,
    #[serde(rename = "prioridad", default)]
    pub priority: Option<Priority>,
}

impl InquiryPatch {
    /// Email is only re-checked when the patch replaces it.
    pub fn validate(self) -> Result<Self, ValidationError> {
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                return Err(ValidationError::InvalidEmail(email.clone()));
            }
        }
        Ok(self)
    }
}
