use std::time::Duration;

use reqwest::blocking::{Client, Response};
use tracing::debug;

use super::{RecordStore, StoreError, StoreResult};
use crate::models::{Song, SongPayload};

/// Collection endpoint used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3030/songs";

/// `RecordStore` backed by a json-server style REST endpoint.
pub struct HttpRecordStore {
    client: Client,
    base_url: String,
}

impl HttpRecordStore {
    /// Build a store for the collection at `base_url`. `None` disables the
    /// request timeout, so a hung backend simply blocks the caller.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> StoreResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Build a store around an already configured client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn record_url(&self, id: i64) -> String {
        record_url(&self.base_url, id)
    }
}

impl RecordStore for HttpRecordStore {
    fn list(&mut self) -> StoreResult<Vec<Song>> {
        debug!(url = %self.base_url, "GET");
        let response = ensure_success(self.client.get(&self.base_url).send()?)?;
        let body = response.text()?;
        parse_song_list(&body)
    }

    fn create(&mut self, payload: &SongPayload) -> StoreResult<()> {
        debug!(url = %self.base_url, name = %payload.name, "POST");
        ensure_success(self.client.post(&self.base_url).json(payload).send()?)?;
        Ok(())
    }

    fn update(&mut self, id: i64, payload: &SongPayload) -> StoreResult<()> {
        let url = self.record_url(id);
        debug!(%url, name = %payload.name, "PUT");
        ensure_success(self.client.put(&url).json(payload).send()?)?;
        Ok(())
    }

    fn delete(&mut self, id: i64) -> StoreResult<()> {
        let url = self.record_url(id);
        debug!(%url, "DELETE");
        ensure_success(self.client.delete(&url).send()?)?;
        Ok(())
    }
}

fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

fn record_url(base_url: &str, id: i64) -> String {
    format!("{base_url}/{id}")
}

/// Turn non-2xx answers into errors; nothing branches on the exact status.
fn ensure_success(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StoreError::Status {
            status,
            url: response.url().to_string(),
        })
    }
}

/// Decode a list response. An absent body, or a literal `null`, means the
/// collection is empty.
fn parse_song_list(body: &str) -> StoreResult<Vec<Song>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let songs: Option<Vec<Song>> = serde_json::from_str(body)?;
    Ok(songs.unwrap_or_default())
}
