//! # Shape Translator
//!
//! Maps between the nested external records and the flat, snake_case rows of
//! the hosted backend tables.
//!
//! Writes go through `*Columns` types whose absent fields are omitted from the
//! serialized body, so a partial update never turns into an explicit `null`.
//! Reads come back as `*Row` types and are rebuilt into the external shape.

pub mod inquiry;
pub mod property;

pub use inquiry::{InquiryColumns, InquiryRow, InquiryStatsRow};
pub use property::{PropertyColumns, PropertyRow, PropertyStatsRow};
