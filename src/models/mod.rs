//! # Listing Records
//!
//! External (API-facing) shapes for the two resources served by this crate.
//! JSON field names are part of the public contract and are mapped onto
//! English Rust names through serde renames.
//!
//! Each resource comes in four flavours:
//! - the stored record (`Property`, `Inquiry`)
//! - a raw creation payload (`*Draft`) that is validated into
//! - a checked creation value (`New*`)
//! - a partial update (`*Patch`) where every field is present-or-absent

pub mod inquiry;
pub mod property;

pub use inquiry::{Inquiry, InquiryDraft, InquiryPatch, InquiryStatus, NewInquiry, Priority};
pub use property::{
    Agent, Attributes, AttributesPatch, Location, NewProperty, OfferingType, Property,
    PropertyDraft, PropertyPatch,
};

use thiserror::Error;

/// Validation failures raised while checking a creation payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields were absent or blank
    #[error("Faltan campos requeridos: {}", missing.join(", "))]
    MissingFields {
        required: &'static [&'static str],
        missing: Vec<&'static str>,
    },

    /// `estado` outside the accepted offering types
    #[error("Estado debe ser \"venta\" o \"arriendo\"")]
    InvalidOffering(String),

    /// Email did not match the accepted pattern
    #[error("Formato de email inválido")]
    InvalidEmail(String),
}

/// Treat whitespace-only strings the same as absent ones.
pub(crate) fn present(value: &Option<String>) -> bool {
    value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
}

/// Overwrite `target` only when the patch carries a value.
pub(crate) fn merge<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Overwrite an optional `target` only when the patch carries a value.
pub(crate) fn merge_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}
