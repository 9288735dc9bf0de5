//! Access to the song backend split across logical submodules.

mod http;
mod memory;

pub use http::{HttpRecordStore, DEFAULT_BASE_URL};
pub use memory::{MemoryStore, StoreCall};

use reqwest::StatusCode;
use thiserror::Error;

use crate::models::{Song, SongPayload};

/// Any failure talking to the backend. Callers treat every variant the same
/// way (log and carry on), the split only makes the log line more useful.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { status: StatusCode, url: String },
    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The four operations the backend exposes over `/songs`.
pub trait RecordStore {
    /// `GET /songs`. An empty or `null` body is an empty collection.
    fn list(&mut self) -> StoreResult<Vec<Song>>;

    /// `POST /songs`. The echoed record is ignored by callers beyond logging.
    fn create(&mut self, payload: &SongPayload) -> StoreResult<()>;

    /// `PUT /songs/{id}`.
    fn update(&mut self, id: i64, payload: &SongPayload) -> StoreResult<()>;

    /// `DELETE /songs/{id}`.
    fn delete(&mut self, id: i64) -> StoreResult<()>;
}
