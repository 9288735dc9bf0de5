//! Core library surface for the song shelf TUI.
//!
//! The `bin` target only parses arguments, sets up logging and hands a
//! configured [`App`] to the event loop; everything it needs is re-exported
//! here so tests can drive the same pieces without a terminal.
pub mod config;
pub mod form;
pub mod image;
pub mod logging;
pub mod models;
pub mod store;
pub mod sync;
pub mod ui;

pub use config::{Cli, Config};
pub use form::{FormController, FormMode, SongField};
pub use image::ImagePolicy;
pub use models::{Song, SongDraft, SongPayload};
pub use store::{HttpRecordStore, MemoryStore, RecordStore, StoreCall, StoreError};
pub use sync::{SubmitOutcome, SyncOrchestrator};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
