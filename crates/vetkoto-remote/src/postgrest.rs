//! PostgREST HTTP backend
//!
//! Maps each [`RemoteStore`] operation to a single request against
//! `<url>/<rest_path>/<source>`. Query parameters are built by pure functions
//! so the wire format is testable without a server.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use vetkoto_core::prelude::*;
use vetkoto_core::{Entity, EntitySchema, Record, RecordId, SchemaRegistry};

use crate::query::ListQuery;
use crate::store::{merge_primary_key, split_primary_key, RemoteStore, SelectOption};

/// Accept header asking PostgREST for a single JSON object instead of an array.
pub const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Prefer header making writes return the affected row.
pub const RETURN_REPRESENTATION: &str = "return=representation";

/// Default REST prefix (Supabase layout).
pub const DEFAULT_REST_PATH: &str = "/rest/v1";

/// Connection settings for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub api_key: String,
    pub rest_path: String,
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            rest_path: DEFAULT_REST_PATH.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Error document PostgREST returns on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for a PostgREST-compatible backend
pub struct PostgrestClient {
    http: reqwest::Client,
    base: Url,
    rest_path: Vec<String>,
    api_key: String,
    registry: SchemaRegistry,
}

impl PostgrestClient {
    pub fn new(config: &BackendConfig, registry: SchemaRegistry) -> Result<Self> {
        let base = Url::parse(config.url.trim())
            .map_err(|e| Error::config(format!("invalid backend url '{}': {e}", config.url)))?;
        if base.cannot_be_a_base() {
            return Err(Error::config(format!(
                "backend url '{}' cannot carry a path",
                config.url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(transport)?;

        Ok(Self {
            http,
            base,
            rest_path: config
                .rest_path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            api_key: config.api_key.clone(),
            registry,
        })
    }

    /// URL of a table or view.
    pub fn endpoint(&self, source: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(&self.rest_path);
            segments.push(source);
        }
        url
    }

    fn schema(&self, entity: Entity) -> &EntitySchema {
        self.registry.schema(entity)
    }

    fn request(&self, method: Method, source: &str) -> RequestBuilder {
        self.http
            .request(method, self.endpoint(source))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(transport)?;
        let response = check_status(response).await?;
        response.json::<T>().await.map_err(transport)
    }
}

impl RemoteStore for PostgrestClient {
    async fn list(&self, entity: Entity, query: &ListQuery) -> Result<Vec<Record>> {
        let schema = self.schema(entity);
        let params = list_params(schema, query);
        debug!("GET {} {:?}", schema.list_source, params);
        self.send(self.request(Method::GET, schema.list_source).query(&params))
            .await
    }

    async fn get(&self, entity: Entity, id: &RecordId) -> Result<Record> {
        let schema = self.schema(entity);
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(pk_params(schema, id));
        debug!("GET {} {}={}", schema.table, schema.primary_key, id);
        self.send(
            self.request(Method::GET, schema.table)
                .query(&params)
                .header(ACCEPT, SINGLE_OBJECT),
        )
        .await
    }

    async fn create(&self, entity: Entity, payload: Record) -> Result<Record> {
        let schema = self.schema(entity);
        debug!("POST {} ({} fields)", schema.table, payload.len());
        self.send(
            self.request(Method::POST, schema.table)
                .query(&[("select", "*")])
                .header(ACCEPT, SINGLE_OBJECT)
                .header("Prefer", RETURN_REPRESENTATION)
                .json(&payload),
        )
        .await
    }

    async fn update(&self, entity: Entity, payload: Record) -> Result<Record> {
        let schema = self.schema(entity);
        let (id, body) = split_primary_key(schema, payload)?;
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(pk_params(schema, &id));
        debug!("PATCH {} {}={}", schema.table, schema.primary_key, id);
        let row: Record = self
            .send(
                self.request(Method::PATCH, schema.table)
                    .query(&params)
                    .header(ACCEPT, SINGLE_OBJECT)
                    .header("Prefer", RETURN_REPRESENTATION)
                    .json(&body),
            )
            .await?;
        Ok(merge_primary_key(schema, &id, row))
    }

    async fn remove(&self, entity: Entity, id: &RecordId) -> Result<()> {
        let schema = self.schema(entity);
        let mut params = vec![("select".to_string(), schema.primary_key.to_string())];
        params.extend(pk_params(schema, id));
        debug!("DELETE {} {}={}", schema.table, schema.primary_key, id);
        let _: Value = self
            .send(
                self.request(Method::DELETE, schema.table)
                    .query(&params)
                    .header(ACCEPT, SINGLE_OBJECT)
                    .header("Prefer", RETURN_REPRESENTATION),
            )
            .await?;
        Ok(())
    }

    async fn options(
        &self,
        entity: Entity,
        label_key: &str,
        value_key: Option<&str>,
    ) -> Result<Vec<SelectOption>> {
        let schema = self.schema(entity);
        let value_key = value_key.unwrap_or(schema.primary_key);
        let params = options_params(value_key, label_key);
        let rows: Vec<Record> = self
            .send(self.request(Method::GET, schema.list_source).query(&params))
            .await?;
        Ok(rows_to_options(rows, value_key, label_key))
    }
}

/// Query parameters of a `list` call.
pub fn list_params(schema: &EntitySchema, query: &ListQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    if let Some(filter) = query.active_filter() {
        params.push((filter.column.clone(), filter.op().to_param()));
    }
    let direction = if query.ascending { "asc" } else { "desc" };
    params.push((
        "order".to_string(),
        format!("{}.{direction}", query.order_column(schema.primary_key)),
    ));
    params.push(("limit".to_string(), query.limit.to_string()));
    params.push(("offset".to_string(), query.offset.to_string()));
    params
}

/// `<pk>=eq.<id>` selector.
pub fn pk_params(schema: &EntitySchema, id: &RecordId) -> Vec<(String, String)> {
    vec![(schema.primary_key.to_string(), format!("eq.{id}"))]
}

/// Query parameters of an `options` call.
pub fn options_params(value_key: &str, label_key: &str) -> Vec<(String, String)> {
    let select = if value_key == label_key {
        value_key.to_string()
    } else {
        format!("{value_key},{label_key}")
    };
    vec![
        ("select".to_string(), select),
        ("order".to_string(), format!("{label_key}.asc")),
    ]
}

/// Map option rows, keeping the backend's label order.
pub fn rows_to_options(rows: Vec<Record>, value_key: &str, label_key: &str) -> Vec<SelectOption> {
    rows.into_iter()
        .map(|row| SelectOption {
            value: row.get(value_key).cloned().unwrap_or(Value::Null),
            label: row.text(label_key),
        })
        .collect()
}

/// Remote failure for a non-2xx response body.
pub fn remote_error(status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.chars().take(200).collect()
            }
        });
    Error::remote(status, message)
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let err = remote_error(status.as_u16(), &body);
    warn!("backend request failed: {err}");
    Err(err)
}

/// Transport-level failure (connect, timeout, decode).
pub(crate) fn transport(err: reqwest::Error) -> Error {
    Error::http(err.to_string())
}
