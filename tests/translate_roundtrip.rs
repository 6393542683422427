//! Property-based tests for the shape translator.
//!
//! Writes a generated record through the column mapping, emulates the
//! backend echoing the row back with its generated fields, and checks that
//! rebuilding the external shape loses nothing. Every optional field is
//! independently present or absent.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use propiedades_api::models::{
    Agent, Attributes, Inquiry, Location, NewInquiry, NewProperty, OfferingType, Priority,
    Property,
};
use propiedades_api::translate::{inquiry, property};

// =============================================================================
// BACKEND EMULATION
// =============================================================================

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 1, 10, 0, 0).unwrap()
}

/// Echo the written columns plus the id and creation time the table assigns.
fn stored<C: Serialize, R: DeserializeOwned>(columns: &C, id: i64, created: DateTime<Utc>) -> R {
    let mut row = serde_json::to_value(columns).unwrap();
    row["id"] = json!(id);
    row["fecha_creacion"] = serde_json::to_value(created).unwrap();
    serde_json::from_value(row).unwrap()
}

// =============================================================================
// STRATEGIES
// =============================================================================

fn text() -> impl Strategy<Value = String> {
    "[a-zA-ZñÑáé0-9 %_*.@+-]{0,16}"
}

fn opt_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of(text())
}

/// Quarter steps keep the values exact through JSON.
fn amount() -> impl Strategy<Value = f64> {
    (0u32..4_000_000_000).prop_map(|n| f64::from(n) / 4.0)
}

fn date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|days| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(days))
}

fn priority() -> impl Strategy<Value = Priority> {
    prop_oneof![Just(Priority::High), Just(Priority::Medium), Just(Priority::Low)]
}

prop_compose! {
    fn location()(
        address in opt_text(),
        district in opt_text(),
        city in opt_text(),
        region in opt_text(),
    ) -> Location {
        Location { address, district, city, region }
    }
}

prop_compose! {
    fn attributes()(
        bedrooms in prop::option::of(0u32..10),
        bathrooms in prop::option::of(0u32..6),
        floor_area in prop::option::of(amount()),
        parking_spaces in prop::option::of(0u32..4),
        furnished in any::<bool>(),
    ) -> Attributes {
        Attributes { bedrooms, bathrooms, floor_area, parking_spaces, furnished }
    }
}

prop_compose! {
    fn agent()(name in opt_text(), phone in opt_text(), email in opt_text()) -> Agent {
        Agent { name, phone, email }
    }
}

prop_compose! {
    fn new_property()(
        title in text(),
        description in opt_text(),
        price in amount(),
        category in text(),
        offering in prop_oneof![Just(OfferingType::Sale), Just(OfferingType::Lease)],
        location in location(),
        attributes in attributes(),
        amenities in prop::collection::vec(text(), 0..4),
        images in prop::collection::vec(text(), 0..3),
        available_from in prop::option::of(date()),
        deposit in opt_text(),
        agent in agent(),
    ) -> NewProperty {
        NewProperty {
            title,
            description,
            price,
            category,
            offering,
            location,
            attributes,
            amenities,
            images,
            available_from,
            deposit,
            agent,
        }
    }
}

prop_compose! {
    fn inquiry_preferences()(
        property_type in opt_text(),
        preferred_location in opt_text(),
        max_budget in prop::option::of(amount()),
        bedrooms in prop::option::of(0u32..10),
        bathrooms in prop::option::of(0u32..6),
        parking_spaces in prop::option::of(0u32..4),
        desired_amenities in prop::collection::vec(text(), 0..4),
    ) -> (Option<String>, Option<String>, Option<f64>, Option<u32>, Option<u32>, Option<u32>, Vec<String>) {
        (property_type, preferred_location, max_budget, bedrooms, bathrooms, parking_spaces, desired_amenities)
    }
}

prop_compose! {
    fn new_inquiry()(
        first_name in text(),
        last_name in text(),
        email in text(),
        phone in text(),
        service_type in text(),
        preferences in inquiry_preferences(),
        pre_approved_credit in prop::option::of(any::<bool>()),
        pre_approved_amount in prop::option::of(amount()),
        search_timeframe in opt_text(),
        move_in_date in opt_text(),
        comments in opt_text(),
        priority in prop::option::of(priority()),
    ) -> NewInquiry {
        let (
            property_type,
            preferred_location,
            max_budget,
            bedrooms,
            bathrooms,
            parking_spaces,
            desired_amenities,
        ) = preferences;
        NewInquiry {
            first_name,
            last_name,
            email,
            phone,
            service_type,
            property_type,
            preferred_location,
            max_budget,
            bedrooms,
            bathrooms,
            parking_spaces,
            desired_amenities,
            pre_approved_credit,
            pre_approved_amount,
            search_timeframe,
            move_in_date,
            comments,
            priority,
        }
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_property_survives_storage(
        new in new_property(),
        id in 1i64..100_000,
        age_secs in 0i64..86_400,
    ) {
        let created = epoch();
        let written_at = created + Duration::seconds(age_secs);

        let row: property::PropertyRow = stored(&property::to_storage(&new, written_at), id, created);
        let external = property::to_external(row);

        let mut expected = Property::from_new(id, new, created);
        expected.updated_at = written_at;
        prop_assert_eq!(external, expected);
    }

    #[test]
    fn prop_inquiry_survives_storage(
        new in new_inquiry(),
        id in 1i64..100_000,
        age_secs in 0i64..86_400,
    ) {
        let created = epoch();
        let written_at = created + Duration::seconds(age_secs);

        let row: inquiry::InquiryRow = stored(&inquiry::to_storage(&new, written_at), id, created);
        let external = inquiry::to_external(row);

        let mut expected = Inquiry::from_new(id, new, created);
        expected.updated_at = written_at;
        prop_assert_eq!(external, expected);
    }
}
