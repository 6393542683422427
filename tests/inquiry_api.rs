//! Inquiry Endpoint Tests
//!
//! Drives `/api/consultas` through the router with an in-memory store:
//! - new inquiries get a numeric id and start as `nueva`
//! - email format is checked on create and update
//! - `/api/consultas/stats` is not captured by the `:id` route

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{get, inquiry_body, memory_app, send};

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn test_create_inquiry_starts_as_new() {
    let (router, store) = memory_app();
    let mut payload = inquiry_body();
    payload["estado"] = json!("completada");

    let (status, body) = send(&router, Method::POST, "/api/consultas", Some(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["data"]["id"].is_i64());
    assert_eq!(body["data"]["estado"], "nueva");
    assert_eq!(body["data"]["prioridad"], "alta");
    assert_eq!(
        body["message"],
        "Consulta enviada exitosamente. Te contactaremos pronto."
    );
    assert_eq!(store.inquiry_count(), 1);
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    let (router, store) = memory_app();
    let mut payload = inquiry_body();
    payload["email"] = json!("ana.example.cl");

    let (status, body) = send(&router, Method::POST, "/api/consultas", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Formato de email inválido");
    assert_eq!(store.inquiry_count(), 0);
}

#[tokio::test]
async fn test_missing_fields_are_listed() {
    let (router, _store) = memory_app();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/consultas",
        Some(json!({ "nombre": "Ana", "email": "ana@example.cl", "telefono": "  " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["required"],
        json!(["nombre", "apellido", "email", "telefono", "tipoServicio"])
    );
    assert_eq!(body["missing"], json!(["apellido", "telefono", "tipoServicio"]));
}

// =============================================================================
// Retrieval, Update & Delete
// =============================================================================

#[tokio::test]
async fn test_inquiry_lifecycle() {
    let (router, store) = memory_app();
    send(&router, Method::POST, "/api/consultas", Some(inquiry_body())).await;

    let (status, body) = get(&router, "/api/consultas/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["nombre"], "Ana");

    let (status, body) = send(
        &router,
        Method::PUT,
        "/api/consultas/1",
        Some(json!({ "estado": "en_proceso", "comentarios": "Llamar el lunes" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["estado"], "en_proceso");
    assert_eq!(body["data"]["comentarios"], "Llamar el lunes");
    assert_eq!(body["data"]["email"], "ana@example.cl");

    let (_, listed) = get(&router, "/api/consultas?estado=en_proceso").await;
    assert_eq!(listed["meta"]["total"], 1);

    let (status, body) = send(&router, Method::DELETE, "/api/consultas/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Consulta eliminada exitosamente");
    assert_eq!(store.inquiry_count(), 0);
}

#[tokio::test]
async fn test_update_rejects_invalid_email() {
    let (router, _store) = memory_app();
    send(&router, Method::POST, "/api/consultas", Some(inquiry_body())).await;

    let (status, _) = send(
        &router,
        Method::PUT,
        "/api/consultas/1",
        Some(json!({ "email": "sin-arroba" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let (router, _store) = memory_app();

    let (status, body) = get(&router, "/api/consultas/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Consulta no encontrada");

    let (status, body) = get(&router, "/api/consultas/siete").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ID de consulta inválido");

    let (status, _) = send(&router, Method::DELETE, "/api/consultas/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Listing & Statistics
// =============================================================================

#[tokio::test]
async fn test_list_filters_by_service_and_priority() {
    let (router, _store) = memory_app();
    send(&router, Method::POST, "/api/consultas", Some(inquiry_body())).await;
    let mut other = inquiry_body();
    other["tipoServicio"] = json!("compra");
    other["prioridad"] = json!("baja");
    send(&router, Method::POST, "/api/consultas", Some(other)).await;

    let (_, body) = get(&router, "/api/consultas?tipoServicio=compra").await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["prioridad"], "baja");

    let (status, _) = get(&router, "/api/consultas?prioridad=urgente").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inquiry_stats_route() {
    let (router, _store) = memory_app();
    send(&router, Method::POST, "/api/consultas", Some(inquiry_body())).await;
    send(&router, Method::POST, "/api/consultas", Some(inquiry_body())).await;

    let (status, body) = get(&router, "/api/consultas/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["porEstado"]["nueva"], 2);
    assert_eq!(body["data"]["porTipoServicio"]["arriendo"], 2);
    assert_eq!(body["data"]["porPrioridad"]["alta"], 2);
    assert_eq!(body["data"]["porPrioridad"]["baja"], 0);
    assert_eq!(body["data"]["recientes"], 2);
    assert!(body["meta"]["timestamp"].is_string());
}
