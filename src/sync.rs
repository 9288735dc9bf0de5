//! Sequencing of backend calls. Every mutation is followed by a full re-read
//! of the collection: the local list is only ever replaced by what the server
//! returned, never patched by hand. Failures are logged at the call site and
//! swallowed so the UI stays interactive.

use tracing::{error, info};

use crate::form::{FormController, FormMode};
use crate::image::ImagePolicy;
use crate::models::Song;
use crate::store::RecordStore;

/// What a call to [`SyncOrchestrator::submit`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created { ok: bool },
    Updated { id: i64, ok: bool },
}

/// Owns the in-memory collection and the store it mirrors.
pub struct SyncOrchestrator<S> {
    store: S,
    songs: Vec<Song>,
    images: ImagePolicy,
}

impl<S: RecordStore> SyncOrchestrator<S> {
    pub fn new(store: S, images: ImagePolicy) -> Self {
        Self {
            store,
            songs: Vec::new(),
            images,
        }
    }

    /// The collection as last returned by the backend.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Replace the collection with the backend's list. On failure the
    /// previous collection is kept.
    pub fn refresh(&mut self) -> bool {
        match self.store.list() {
            Ok(songs) => {
                info!(count = songs.len(), "song list refreshed");
                self.songs = songs;
                true
            }
            Err(err) => {
                error!(error = %err, "error getting song data");
                false
            }
        }
    }

    /// Save the active draft: update in edit mode, create otherwise. The
    /// form is reset whatever the outcome, then the list is re-read.
    pub fn submit(&mut self, form: &mut FormController) -> SubmitOutcome {
        let outcome = match form.mode() {
            FormMode::Edit { id } => {
                let payload = form.edit_draft().to_payload(self.images.image_for_save());
                let ok = match self.store.update(id, &payload) {
                    Ok(()) => true,
                    Err(err) => {
                        error!(id, error = %err, "error editing a song");
                        false
                    }
                };
                form.cancel_edit();
                SubmitOutcome::Updated { id, ok }
            }
            FormMode::Create => {
                let payload = form.create_draft().to_payload(self.images.image_for_save());
                let ok = match self.store.create(&payload) {
                    Ok(()) => true,
                    Err(err) => {
                        error!(error = %err, "error adding a song");
                        false
                    }
                };
                form.clear_create_fields();
                SubmitOutcome::Created { ok }
            }
        };

        self.refresh();
        form.reconcile(&self.songs);
        outcome
    }

    /// Delete a record, then re-read the list whether or not it worked.
    pub fn delete_record(&mut self, id: i64) -> bool {
        let ok = match self.store.delete(id) {
            Ok(()) => true,
            Err(err) => {
                error!(id, error = %err, "error deleting a song");
                false
            }
        };
        self.refresh();
        ok
    }
}
