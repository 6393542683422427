//! Demo listings used to populate a fresh store for local runs.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::{Agent, Attributes, Location, NewProperty, OfferingType};

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn providencia() -> NewProperty {
    NewProperty {
        title: "Departamento Moderno en Providencia".to_string(),
        description: text(
            "Moderno departamento completamente amoblado en el corazón de Providencia.",
        ),
        price: 850_000.0,
        category: "departamento".to_string(),
        offering: OfferingType::Lease,
        location: Location {
            address: text("Av. Providencia 1234"),
            district: text("Providencia"),
            city: text("Santiago"),
            region: text("Metropolitana"),
        },
        attributes: Attributes {
            bedrooms: Some(2),
            bathrooms: Some(2),
            floor_area: Some(90.0),
            parking_spaces: Some(1),
            furnished: true,
        },
        amenities: list(&["Gimnasio", "Terraza", "Amoblado"]),
        images: list(&[
            "/uploads/depto-providencia-1.jpg",
            "/uploads/depto-providencia-2.jpg",
        ]),
        available_from: NaiveDate::from_ymd_opt(2025, 2, 1),
        deposit: text("2 meses"),
        agent: Agent {
            name: text("María González"),
            phone: text("+56 9 1234 5678"),
            email: text("maria@corretajepremium.cl"),
        },
    }
}

fn las_condes() -> NewProperty {
    NewProperty {
        title: "Casa Familiar en Las Condes".to_string(),
        description: text(
            "Amplia casa familiar con todas las comodidades en sector exclusivo.",
        ),
        price: 1_200_000.0,
        category: "casa".to_string(),
        offering: OfferingType::Lease,
        location: Location {
            address: text("Los Conquistadores 5678"),
            district: text("Las Condes"),
            city: text("Santiago"),
            region: text("Metropolitana"),
        },
        attributes: Attributes {
            bedrooms: Some(4),
            bathrooms: Some(3),
            floor_area: Some(180.0),
            parking_spaces: Some(2),
            furnished: false,
        },
        amenities: list(&["Jardín", "Piscina", "Quincho"]),
        images: list(&[
            "/uploads/casa-lascondes-1.jpg",
            "/uploads/casa-lascondes-2.jpg",
        ]),
        available_from: NaiveDate::from_ymd_opt(2025, 1, 15),
        deposit: text("2 meses"),
        agent: Agent {
            name: text("Carlos Rodríguez"),
            phone: text("+56 9 8765 4321"),
            email: text("carlos@corretajepremium.cl"),
        },
    }
}

fn vitacura() -> NewProperty {
    NewProperty {
        title: "Penthouse Exclusivo en Vitacura".to_string(),
        description: text("Penthouse de lujo con tecnología de punta y servicios premium."),
        price: 450_000_000.0,
        category: "penthouse".to_string(),
        offering: OfferingType::Sale,
        location: Location {
            address: text("Av. Kennedy 9876"),
            district: text("Vitacura"),
            city: text("Santiago"),
            region: text("Metropolitana"),
        },
        attributes: Attributes {
            bedrooms: Some(4),
            bathrooms: Some(4),
            floor_area: Some(220.0),
            parking_spaces: Some(3),
            furnished: true,
        },
        amenities: list(&["Terraza 360°", "Jacuzzi", "Smart Home", "Conserje"]),
        images: list(&[
            "/uploads/penthouse-vitacura-1.jpg",
            "/uploads/penthouse-vitacura-2.jpg",
        ]),
        available_from: NaiveDate::from_ymd_opt(2025, 3, 1),
        deposit: None,
        agent: Agent {
            name: text("Ana Martínez"),
            phone: text("+56 9 5555 6666"),
            email: text("ana@corretajepremium.cl"),
        },
    }
}

fn nunoa() -> NewProperty {
    NewProperty {
        title: "Casa con Jardín en Ñuñoa".to_string(),
        description: text("Acogedora casa con amplio jardín, perfecta para familias."),
        price: 320_000_000.0,
        category: "casa".to_string(),
        offering: OfferingType::Sale,
        location: Location {
            address: text("Irarrázaval 2345"),
            district: text("Ñuñoa"),
            city: text("Santiago"),
            region: text("Metropolitana"),
        },
        attributes: Attributes {
            bedrooms: Some(3),
            bathrooms: Some(2),
            floor_area: Some(120.0),
            parking_spaces: Some(1),
            furnished: false,
        },
        amenities: list(&["Jardín", "Terraza", "Bodega"]),
        images: list(&["/uploads/casa-nunoa-1.jpg", "/uploads/casa-nunoa-2.jpg"]),
        available_from: NaiveDate::from_ymd_opt(2025, 2, 15),
        deposit: None,
        agent: Agent {
            name: text("Luis Fernández"),
            phone: text("+56 9 7777 8888"),
            email: text("luis@corretajepremium.cl"),
        },
    }
}

fn san_miguel() -> NewProperty {
    NewProperty {
        title: "Departamento Nuevo en San Miguel".to_string(),
        description: text("Departamento nuevo con excelente conectividad y servicios."),
        price: 650_000.0,
        category: "departamento".to_string(),
        offering: OfferingType::Lease,
        location: Location {
            address: text("Gran Avenida 3456"),
            district: text("San Miguel"),
            city: text("Santiago"),
            region: text("Metropolitana"),
        },
        attributes: Attributes {
            bedrooms: Some(2),
            bathrooms: Some(1),
            floor_area: Some(65.0),
            parking_spaces: Some(1),
            furnished: false,
        },
        amenities: list(&["Gimnasio", "Sala de Eventos", "Seguridad 24h"]),
        images: list(&[
            "/uploads/depto-sanmiguel-1.jpg",
            "/uploads/depto-sanmiguel-2.jpg",
        ]),
        available_from: NaiveDate::from_ymd_opt(2025, 1, 20),
        deposit: text("1 mes"),
        agent: Agent {
            name: text("Patricia Silva"),
            phone: text("+56 9 9999 0000"),
            email: text("patricia@corretajepremium.cl"),
        },
    }
}

fn created(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 1, hour, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Three sample listings covering both offering types, with the fixed
/// creation times (2024-12-01, 10:00 to 12:00 UTC) the in-memory store
/// starts from
pub fn demo_listings() -> Vec<(NewProperty, DateTime<Utc>)> {
    vec![
        (providencia(), created(10)),
        (las_condes(), created(11)),
        (vitacura(), created(12)),
    ]
}

/// The five listings pushed into a hosted store by the `seed` command
pub fn migration_listings() -> Vec<NewProperty> {
    vec![providencia(), las_condes(), vitacura(), nunoa(), san_miguel()]
}
