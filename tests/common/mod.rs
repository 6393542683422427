//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use propiedades_api::config::AppConfig;
use propiedades_api::http_server::HttpServer;
use propiedades_api::store::{ListingStore, MemoryStore};

pub fn app(store: Arc<dyn ListingStore>) -> Router {
    HttpServer::with_config(AppConfig::default(), store).router()
}

/// A router over a fresh in-memory store, plus a handle to that store
pub fn memory_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (app(store.clone()), store)
}

pub fn seeded_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_demo_data());
    (app(store.clone()), store)
}

pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::GET, uri, None).await
}

pub fn property_body() -> Value {
    json!({
        "titulo": "Casa con Jardín en Ñuñoa",
        "precio": 650000,
        "tipo": "casa",
        "estado": "arriendo",
        "ubicacion": { "direccion": "Irarrázaval 3000", "comuna": "Ñuñoa", "ciudad": "Santiago" },
        "caracteristicas": { "dormitorios": 3, "banos": 2, "metrosCuadrados": 120 },
        "amenidades": ["Jardín", "Bodega"],
        "garantia": "1 mes"
    })
}

pub fn inquiry_body() -> Value {
    json!({
        "nombre": "Ana",
        "apellido": "Pérez",
        "email": "ana@example.cl",
        "telefono": "+56 9 1111 2222",
        "tipoServicio": "arriendo",
        "presupuestoMaximo": 900000,
        "dormitorios": 2,
        "amenidadesDeseadas": ["Gimnasio"],
        "prioridad": "alta"
    })
}
