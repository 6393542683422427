//! Property-based tests for the listing filter engine.
//!
//! Generates random listings and random criteria and checks that:
//! 1. The result is exactly the subset satisfying every present criterion
//! 2. The result is ordered newest first
//! 3. Empty criteria return everything

use std::collections::HashSet;

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use propiedades_api::filter::{Criteria, DateRange, PropertyFilter};
use propiedades_api::models::{
    Agent, Attributes, Location, NewProperty, OfferingType, Property,
};

// =============================================================================
// STRATEGIES
// =============================================================================

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

fn offering_strategy() -> impl Strategy<Value = OfferingType> {
    prop_oneof![Just(OfferingType::Sale), Just(OfferingType::Lease)]
}

fn category_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("casa".to_string()),
        Just("departamento".to_string()),
        Just("penthouse".to_string()),
        Just("Casa".to_string()),
    ]
}

fn district_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just("Las Condes".to_string()),
        Just("Providencia".to_string()),
        Just("Vitacura".to_string()),
        Just("Lo Barnechea".to_string()),
    ])
}

prop_compose! {
    fn property_strategy()(
        offering in offering_strategy(),
        category in category_strategy(),
        district in district_strategy(),
        price in 0u32..2_000_000,
        bedrooms in prop::option::of(0u32..6),
        bathrooms in prop::option::of(0u32..4),
        age_hours in 0i64..240,
    ) -> (NewProperty, DateTime<Utc>) {
        let new = NewProperty {
            title: format!("{} en {:?}", category, district),
            description: None,
            price: f64::from(price),
            category,
            offering,
            location: Location { district, ..Default::default() },
            attributes: Attributes {
                bedrooms,
                bathrooms,
                ..Default::default()
            },
            amenities: Vec::new(),
            images: Vec::new(),
            available_from: None,
            deposit: None,
            agent: Agent::default(),
        };
        (new, epoch() + Duration::hours(age_hours))
    }
}

fn listings_strategy() -> impl Strategy<Value = Vec<Property>> {
    prop::collection::vec(property_strategy(), 0..40).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (new, created))| Property::from_new(i as i64 + 1, new, created))
            .collect()
    })
}

prop_compose! {
    fn filter_strategy()(
        offering in prop::option::of(offering_strategy()),
        category in prop::option::of(category_strategy()),
        district in prop::option::of(prop_oneof![
            Just("condes".to_string()),
            Just("PROVI".to_string()),
            Just("a".to_string()),
        ]),
        min_price in prop::option::of(0u32..2_000_000),
        max_price in prop::option::of(0u32..2_000_000),
        min_bedrooms in prop::option::of(0u32..6),
        min_bathrooms in prop::option::of(0u32..4),
        from_hours in prop::option::of(0i64..240),
        to_hours in prop::option::of(0i64..240),
    ) -> PropertyFilter {
        PropertyFilter {
            offering,
            category,
            district,
            min_price: min_price.map(f64::from),
            max_price: max_price.map(f64::from),
            min_bedrooms,
            min_bathrooms,
            created: DateRange {
                from: from_hours.map(|h| epoch() + Duration::hours(h)),
                to: to_hours.map(|h| epoch() + Duration::hours(h)),
            },
        }
    }
}

/// Reference predicate written independently of the engine
fn satisfies(p: &Property, f: &PropertyFilter) -> bool {
    f.offering.map_or(true, |o| p.offering == o)
        && f.category.as_ref().map_or(true, |c| &p.category == c)
        && f.district.as_ref().map_or(true, |d| {
            p.location
                .district
                .as_ref()
                .is_some_and(|have| have.to_lowercase().contains(&d.to_lowercase()))
        })
        && f.min_price.map_or(true, |min| p.price >= min)
        && f.max_price.map_or(true, |max| p.price <= max)
        && f.min_bedrooms
            .map_or(true, |min| p.attributes.bedrooms.is_some_and(|b| b >= min))
        && f.min_bathrooms
            .map_or(true, |min| p.attributes.bathrooms.is_some_and(|b| b >= min))
        && f.created.from.map_or(true, |from| p.created_at >= from)
        && f.created.to.map_or(true, |to| p.created_at <= to)
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn filtered_result_is_exact_conjunctive_subset(
        listings in listings_strategy(),
        filter in filter_strategy(),
    ) {
        let result = filter.apply(listings.clone());

        let got: HashSet<i64> = result.iter().map(|p| p.id).collect();
        let expected: HashSet<i64> = listings
            .iter()
            .filter(|p| satisfies(p, &filter))
            .map(|p| p.id)
            .collect();

        prop_assert_eq!(result.len(), got.len());
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn filtered_result_is_newest_first(
        listings in listings_strategy(),
        filter in filter_strategy(),
    ) {
        let result = filter.apply(listings);

        prop_assert!(result.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn ties_keep_original_order(listings in listings_strategy()) {
        let result = PropertyFilter::default().apply(listings.clone());
        prop_assert_eq!(result.len(), listings.len());

        for pair in result.windows(2) {
            if pair[0].created_at == pair[1].created_at {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }
}
