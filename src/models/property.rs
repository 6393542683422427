//! Property listing records.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{merge, merge_opt, present, ValidationError};

/// Fields a creation payload must carry
pub const REQUIRED_FIELDS: &[&str] = &["titulo", "precio", "tipo", "estado"];

/// Whether a listing is offered for sale or for lease
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferingType {
    #[serde(rename = "venta")]
    Sale,
    #[serde(rename = "arriendo")]
    Lease,
}

impl OfferingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferingType::Sale => "venta",
            OfferingType::Lease => "arriendo",
        }
    }

    /// Exact, case-sensitive match against the wire values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "venta" => Some(OfferingType::Sale),
            "arriendo" => Some(OfferingType::Lease),
            _ => None,
        }
    }
}

impl fmt::Display for OfferingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Street address of a listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "comuna", default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(rename = "ciudad", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "region", default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Location {
    fn merge(&mut self, patch: Location) {
        merge_opt(&mut self.address, patch.address);
        merge_opt(&mut self.district, patch.district);
        merge_opt(&mut self.city, patch.city);
        merge_opt(&mut self.region, patch.region);
    }
}

/// Physical attributes of a listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(rename = "dormitorios", default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(rename = "banos", default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(rename = "metrosCuadrados", default, skip_serializing_if = "Option::is_none")]
    pub floor_area: Option<f64>,
    #[serde(rename = "estacionamientos", default, skip_serializing_if = "Option::is_none")]
    pub parking_spaces: Option<u32>,
    #[serde(rename = "amoblado", default)]
    pub furnished: bool,
}

/// Partial update of [`Attributes`]; `furnished` may be left untouched
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AttributesPatch {
    #[serde(rename = "dormitorios", default)]
    pub bedrooms: Option<u32>,
    #[serde(rename = "banos", default)]
    pub bathrooms: Option<u32>,
    #[serde(rename = "metrosCuadrados", default)]
    pub floor_area: Option<f64>,
    #[serde(rename = "estacionamientos", default)]
    pub parking_spaces: Option<u32>,
    #[serde(rename = "amoblado", default)]
    pub furnished: Option<bool>,
}

impl Attributes {
    fn merge(&mut self, patch: AttributesPatch) {
        merge_opt(&mut self.bedrooms, patch.bedrooms);
        merge_opt(&mut self.bathrooms, patch.bathrooms);
        merge_opt(&mut self.floor_area, patch.floor_area);
        merge_opt(&mut self.parking_spaces, patch.parking_spaces);
        merge(&mut self.furnished, patch.furnished);
    }
}

/// Listing agent contact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "email", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Agent {
    fn merge(&mut self, patch: Agent) {
        merge_opt(&mut self.name, patch.name);
        merge_opt(&mut self.phone, patch.phone);
        merge_opt(&mut self.email, patch.email);
    }
}

/// A stored property listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "tipo")]
    pub category: String,
    #[serde(rename = "estado")]
    pub offering: OfferingType,
    #[serde(rename = "ubicacion", default)]
    pub location: Location,
    #[serde(rename = "caracteristicas", default)]
    pub attributes: Attributes,
    #[serde(rename = "amenidades", default)]
    pub amenities: Vec<String>,
    #[serde(rename = "imagenes", default)]
    pub images: Vec<String>,
    #[serde(rename = "fechaDisponible", default, skip_serializing_if = "Option::is_none")]
    pub available_from: Option<NaiveDate>,
    #[serde(rename = "garantia", default, skip_serializing_if = "Option::is_none")]
    pub deposit: Option<String>,
    #[serde(rename = "agente", default)]
    pub agent: Agent,
    #[serde(rename = "fechaCreacion")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "fechaActualizacion")]
    pub updated_at: DateTime<Utc>,
}

/// A checked creation payload, ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub offering: OfferingType,
    pub location: Location,
    pub attributes: Attributes,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub available_from: Option<NaiveDate>,
    pub deposit: Option<String>,
    pub agent: Agent,
}

impl Property {
    /// Materialize a new record with server-assigned id and timestamps
    pub fn from_new(id: i64, new: NewProperty, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            price: new.price,
            category: new.category,
            offering: new.offering,
            location: new.location,
            attributes: new.attributes,
            amenities: new.amenities,
            images: new.images,
            available_from: new.available_from,
            deposit: new.deposit,
            agent: new.agent,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the fields present in `patch`; `id` and `created_at` never change.
    pub fn apply_patch(&mut self, patch: PropertyPatch, now: DateTime<Utc>) {
        merge(&mut self.title, patch.title);
        merge_opt(&mut self.description, patch.description);
        merge(&mut self.price, patch.price);
        merge(&mut self.category, patch.category);
        merge(&mut self.offering, patch.offering);
        if let Some(location) = patch.location {
            self.location.merge(location);
        }
        if let Some(attributes) = patch.attributes {
            self.attributes.merge(attributes);
        }
        merge(&mut self.amenities, patch.amenities);
        merge(&mut self.images, patch.images);
        merge_opt(&mut self.available_from, patch.available_from);
        merge_opt(&mut self.deposit, patch.deposit);
        if let Some(agent) = patch.agent {
            self.agent.merge(agent);
        }
        self.updated_at = now;
    }
}

/// Raw creation body as received over HTTP.
///
/// Unknown fields (including any client-supplied `id` or timestamps) are
/// dropped by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyDraft {
    #[serde(rename = "titulo", default)]
    pub title: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio", default)]
    pub price: Option<f64>,
    #[serde(rename = "tipo", default)]
    pub category: Option<String>,
    #[serde(rename = "estado", default)]
    pub offering: Option<String>,
    #[serde(rename = "ubicacion", default)]
    pub location: Option<Location>,
    #[serde(rename = "caracteristicas", default)]
    pub attributes: Option<AttributesPatch>,
    #[serde(rename = "amenidades", default)]
    pub amenities: Option<Vec<String>>,
    #[serde(rename = "imagenes", default)]
    pub images: Option<Vec<String>>,
    #[serde(rename = "fechaDisponible", default)]
    pub available_from: Option<NaiveDate>,
    #[serde(rename = "garantia", default)]
    pub deposit: Option<String>,
    #[serde(rename = "agente", default)]
    pub agent: Option<Agent>,
}

impl PropertyDraft {
    /// Check required fields and the offering type, filling defaults.
    pub fn validate(self) -> Result<NewProperty, ValidationError> {
        let mut missing = Vec::new();
        if !present(&self.title) {
            missing.push("titulo");
        }
        if self.price.is_none() {
            missing.push("precio");
        }
        if !present(&self.category) {
            missing.push("tipo");
        }
        if !present(&self.offering) {
            missing.push("estado");
        }

        let (Some(title), Some(price), Some(category), Some(offering)) =
            (self.title, self.price, self.category, self.offering)
        else {
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

        let offering =
            OfferingType::parse(&offering).ok_or(ValidationError::InvalidOffering(offering))?;

        let mut attributes = Attributes::default();
        if let Some(patch) = self.attributes {
            attributes.merge(patch);
        }

        Ok(NewProperty {
            title,
            description: self.description,
            price,
            category,
            offering,
            location: self.location.unwrap_or_default(),
            attributes,
            amenities: self.amenities.unwrap_or_default(),
            images: self.images.unwrap_or_default(),
            available_from: self.available_from,
            deposit: self.deposit,
            agent: self.agent.unwrap_or_default(),
        })
    }
}

/// Partial update body; every field is present-or-absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PropertyPatch {
    #[serde(rename = "titulo", default)]
    pub title: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio", default)]
    pub price: Option<f64>,
    #[serde(rename = "tipo", default)]
    pub category: Option<String>,
    #[serde(rename = "estado", default)]
    pub offering: Option<OfferingType>,
    #[serde(rename = "ubicacion", default)]
    pub location: Option<Location>,
    #[serde(rename = "caracteristicas", default)]
    pub attributes: Option<AttributesPatch>,
    #[serde(rename = "amenidades", default)]
    pub amenities: Option<Vec<String>>,
    #[serde(rename = "imagenes", default)]
    pub images: Option<Vec<String>>,
    #[serde(rename = "fechaDisponible", default)]
    pub available_from: Option<NaiveDate>,
    #[serde(rename = "garantia", default)]
    pub deposit: Option<String>,
    #[serde(rename = "agente", default)]
    pub agent: Option<Agent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(value: serde_json::Value) -> PropertyDraft {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_offering_type_parse() {
        assert_eq!(OfferingType::parse("venta"), Some(OfferingType::Sale));
        assert_eq!(OfferingType::parse("arriendo"), Some(OfferingType::Lease));
        assert_eq!(OfferingType::parse("Venta"), None);
        assert_eq!(OfferingType::parse("alquiler"), None);
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let err = draft(json!({"titulo": "Casa", "tipo": "  "}))
            .validate()
            .unwrap_err();

        assert_eq!(
            err,
            ValidationError::MissingFields {
                required: REQUIRED_FIELDS,
                missing: vec!["precio", "tipo", "estado"],
            }
        );
    }

    #[test]
    fn test_validate_rejects_unknown_offering() {
        let err = draft(json!({
            "titulo": "Casa", "precio": 100, "tipo": "casa", "estado": "permuta"
        }))
        .validate()
        .unwrap_err();

        assert_eq!(err, ValidationError::InvalidOffering("permuta".to_string()));
    }

    #[test]
    fn test_validate_fills_defaults() {
        let new = draft(json!({
            "titulo": "Casa", "precio": 100, "tipo": "casa", "estado": "venta",
            "caracteristicas": {"dormitorios": 3},
            "id": 99
        }))
        .validate()
        .unwrap();

        assert_eq!(new.offering, OfferingType::Sale);
        assert_eq!(new.attributes.bedrooms, Some(3));
        assert!(!new.attributes.furnished);
        assert!(new.amenities.is_empty());
        assert!(new.images.is_empty());
    }

    #[test]
    fn test_apply_patch_keeps_omitted_fields() {
        let created = DateTime::parse_from_rfc3339("2024-12-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let new = draft(json!({
            "titulo": "Casa", "precio": 100, "tipo": "casa", "estado": "venta",
            "ubicacion": {"comuna": "Providencia", "ciudad": "Santiago"},
            "caracteristicas": {"dormitorios": 3, "amoblado": true},
            "amenidades": ["Piscina"]
        }))
        .validate()
        .unwrap();
        let mut property = Property::from_new(7, new, created);

        let patch: PropertyPatch = serde_json::from_value(json!({
            "precio": 150,
            "ubicacion": {"comuna": "Ñuñoa"},
            "caracteristicas": {"banos": 2}
        }))
        .unwrap();
        let now = Utc::now();
        property.apply_patch(patch, now);

        assert_eq!(property.id, 7);
        assert_eq!(property.price, 150.0);
        assert_eq!(property.title, "Casa");
        assert_eq!(property.location.district.as_deref(), Some("Ñuñoa"));
        assert_eq!(property.location.city.as_deref(), Some("Santiago"));
        assert_eq!(property.attributes.bedrooms, Some(3));
        assert_eq!(property.attributes.bathrooms, Some(2));
        assert!(property.attributes.furnished);
        assert_eq!(property.amenities, vec!["Piscina".to_string()]);
        assert_eq!(property.created_at, created);
        assert_eq!(property.updated_at, now);
    }

    #[test]
    fn test_property_serializes_contract_names() {
        let new = draft(json!({
            "titulo": "Casa", "precio": 100, "tipo": "casa", "estado": "arriendo"
        }))
        .validate()
        .unwrap();
        let value = serde_json::to_value(Property::from_new(1, new, Utc::now())).unwrap();

        assert_eq!(value["titulo"], "Casa");
        assert_eq!(value["estado"], "arriendo");
        assert_eq!(value["caracteristicas"]["amoblado"], false);
        assert!(value.get("descripcion").is_none());
        assert!(value.get("fechaCreacion").is_some());
    }
}
