//! # PostgREST Query Builder
//!
//! Minimal client for the REST interface Supabase exposes over each table.
//! Predicates are rendered as `column=op.value` query pairs:
//!
//! ```text
//! GET /rest/v1/propiedades?select=*&estado=eq.venta&comuna=ilike.*condes*&order=fecha_creacion.desc
//! ```

use std::fmt::Display;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::errors::{StoreError, StoreResult};

/// Connection to a Supabase project's REST endpoint
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl PostgrestClient {
    /// `base_url` is the project URL, e.g. `https://xyz.supabase.co`
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Start a query against `table`
    pub fn from(&self, table: &str) -> Query<'_> {
        Query {
            client: self,
            table: table.to_string(),
            params: Vec::new(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

/// A query under construction. Predicates combine with AND.
#[derive(Debug, Clone)]
pub struct Query<'a> {
    client: &'a PostgrestClient,
    table: String,
    params: Vec<(String, String)>,
}

impl<'a> Query<'a> {
    /// Columns to return (comma-separated, `*` for all)
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    fn predicate(mut self, column: &str, op: &str, value: impl Display) -> Self {
        self.params
            .push((column.to_string(), format!("{}.{}", op, value)));
        self
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.predicate(column, "eq", value)
    }

    /// Case-insensitive substring match. `%`, `_` and `\` in the needle
    /// match literally; PostgREST has no escape for `*`, so it is dropped.
    pub fn ilike_contains(self, column: &str, needle: &str) -> Self {
        self.predicate(column, "ilike", format!("*{}*", escape_like(needle)))
    }

    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.predicate(column, "gte", value)
    }

    pub fn lte(self, column: &str, value: impl Display) -> Self {
        self.predicate(column, "lte", value)
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.params
            .push(("order".to_string(), format!("{}.{}", column, direction)));
        self
    }

    /// Rendered query pairs, in insertion order
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .http
            .request(method, self.client.table_url(&self.table))
            .header("apikey", &self.client.api_key)
            .bearer_auth(&self.client.api_key)
            .query(&self.params)
    }

    /// `GET` matching rows
    pub async fn fetch<T: DeserializeOwned>(self) -> StoreResult<Vec<T>> {
        debug!(table = %self.table, params = ?self.params, "postgrest select");
        send(self.request(Method::GET)).await
    }

    /// `POST` one row and return the stored representation
    pub async fn insert<B, T>(self, body: &B) -> StoreResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(table = %self.table, "postgrest insert");
        send(
            self.request(Method::POST)
                .header("Prefer", "return=representation")
                .json(body),
        )
        .await
    }

    /// `PATCH` matching rows and return their new representation
    pub async fn update<B, T>(self, body: &B) -> StoreResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(table = %self.table, params = ?self.params, "postgrest update");
        send(
            self.request(Method::PATCH)
                .header("Prefer", "return=representation")
                .json(body),
        )
        .await
    }

    /// `DELETE` matching rows and return what was removed
    pub async fn delete<T: DeserializeOwned>(self) -> StoreResult<Vec<T>> {
        debug!(table = %self.table, params = ?self.params, "postgrest delete");
        send(
            self.request(Method::DELETE)
                .header("Prefer", "return=representation"),
        )
        .await
    }
}

fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        match c {
            '\\' | '%' | '_' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '*' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Send once and decode a JSON array body. No retries.
async fn send<T: DeserializeOwned>(request: RequestBuilder) -> StoreResult<Vec<T>> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(StoreError::Backend {
            status: status.as_u16(),
            message: backend_message(&body),
        });
    }
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&body)?)
}

/// PostgREST errors carry a JSON `message`; fall back to the raw body.
fn backend_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
