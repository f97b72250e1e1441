//! CSV to JSON conversion
//!
//! Imports go through a [`CsvConverter`]: either the local codec or a remote
//! conversion endpoint accepting a multipart upload in the `csv_file` field.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use url::Url;

use vetkoto_core::prelude::*;
use vetkoto_core::{convert_csv, ConversionReply, ConversionResponse};

use crate::postgrest::transport;

/// Multipart field the conversion endpoint reads.
pub const CSV_FILE_FIELD: &str = "csv_file";

/// Client for a remote CSV conversion endpoint
pub struct ConversionClient {
    http: reqwest::Client,
    url: Url,
}

impl ConversionClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(url.trim())
            .map_err(|e| Error::config(format!("invalid converter url '{url}': {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;
        Ok(Self { http, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Upload the file and parse the `{status, total, data}` reply.
    pub async fn convert(&self, file_name: &str, contents: Vec<u8>) -> Result<ConversionResponse> {
        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(transport)?;
        let form = Form::new().part(CSV_FILE_FIELD, part);

        debug!("POST {} ({file_name})", self.url);
        let response = self
            .http
            .post(self.url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::import(format!("Server returned {}", status.as_u16())));
        }

        let reply: ConversionReply = response.json().await.map_err(transport)?;
        reply.into_result()
    }
}

/// Where CSV files are turned into rows.
pub enum CsvConverter {
    Local,
    Remote(ConversionClient),
}

impl CsvConverter {
    /// Remote when an endpoint is configured, local otherwise.
    pub fn from_url(url: Option<&str>, timeout: Duration) -> Result<Self> {
        match url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => Ok(CsvConverter::Remote(ConversionClient::new(url, timeout)?)),
            None => Ok(CsvConverter::Local),
        }
    }

    pub async fn convert(&self, file_name: &str, contents: Vec<u8>) -> Result<ConversionResponse> {
        match self {
            CsvConverter::Local => {
                let text = String::from_utf8(contents)
                    .map_err(|_| Error::import(format!("{file_name} is not valid UTF-8")))?;
                convert_csv(&text)
            }
            CsvConverter::Remote(client) => client.convert(file_name, contents).await,
        }
    }
}
