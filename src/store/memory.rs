use reqwest::StatusCode;

use super::{RecordStore, StoreError, StoreResult};
use crate::models::{Song, SongPayload};

/// One call observed by a [`MemoryStore`], in the order it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List,
    Create(SongPayload),
    Update(i64, SongPayload),
    Delete(i64),
}

/// In-process stand-in for the REST backend. It assigns ids the way
/// json-server does, records every call, and can be told to fail list or
/// mutation calls to simulate an unreachable server.
#[derive(Debug, Default)]
pub struct MemoryStore {
    songs: Vec<Song>,
    next_id: i64,
    calls: Vec<StoreCall>,
    fail_list: bool,
    fail_mutations: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Seed the store with existing records.
    pub fn with_songs(songs: Vec<Song>) -> Self {
        let next_id = songs.iter().map(|song| song.id + 1).max().unwrap_or(1);
        Self {
            songs,
            next_id,
            ..Self::default()
        }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn calls(&self) -> &[StoreCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn fail_list(&mut self, fail: bool) {
        self.fail_list = fail;
    }

    pub fn fail_mutations(&mut self, fail: bool) {
        self.fail_mutations = fail;
    }

    fn check_mutation(&self) -> StoreResult<()> {
        if self.fail_mutations {
            Err(StoreError::Unavailable("simulated network error".into()))
        } else {
            Ok(())
        }
    }

    fn position(&self, id: i64) -> StoreResult<usize> {
        self.songs
            .iter()
            .position(|song| song.id == id)
            .ok_or_else(|| StoreError::Status {
                status: StatusCode::NOT_FOUND,
                url: format!("memory:/songs/{id}"),
            })
    }
}

impl RecordStore for MemoryStore {
    fn list(&mut self) -> StoreResult<Vec<Song>> {
        self.calls.push(StoreCall::List);
        if self.fail_list {
            return Err(StoreError::Unavailable("simulated network error".into()));
        }
        Ok(self.songs.clone())
    }

    fn create(&mut self, payload: &SongPayload) -> StoreResult<()> {
        self.calls.push(StoreCall::Create(payload.clone()));
        self.check_mutation()?;
        let id = self.next_id;
        self.next_id += 1;
        self.songs.push(Song {
            id,
            name: payload.name.clone(),
            performer: payload.performer.clone(),
            description: payload.description.clone(),
            release_year: payload.release_year.clone(),
            created_at: None,
            image: payload.image.clone().unwrap_or_default(),
        });
        Ok(())
    }

    fn update(&mut self, id: i64, payload: &SongPayload) -> StoreResult<()> {
        self.calls.push(StoreCall::Update(id, payload.clone()));
        self.check_mutation()?;
        let index = self.position(id)?;
        let song = &mut self.songs[index];
        song.name = payload.name.clone();
        song.performer = payload.performer.clone();
        song.description = payload.description.clone();
        song.release_year = payload.release_year.clone();
        song.image = payload.image.clone().unwrap_or_default();
        Ok(())
    }

    fn delete(&mut self, id: i64) -> StoreResult<()> {
        self.calls.push(StoreCall::Delete(id));
        self.check_mutation()?;
        let index = self.position(id)?;
        self.songs.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SongDraft;

    fn payload(name: &str) -> SongPayload {
        SongDraft {
            name: name.into(),
            ..SongDraft::default()
        }
        .to_payload(None)
    }

    #[test]
    fn ids_continue_after_seeded_records() {
        let mut store = MemoryStore::with_songs(vec![Song {
            id: 4,
            name: "Seed".into(),
            performer: String::new(),
            description: String::new(),
            release_year: String::new(),
            created_at: None,
            image: String::new(),
        }]);
        store.create(&payload("Next")).unwrap();
        assert_eq!(store.songs()[1].id, 5);
    }

    #[test]
    fn missing_record_is_not_found() {
        let mut store = MemoryStore::new();
        let err = store.delete(9).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Status { status, .. } if status == StatusCode::NOT_FOUND
        ));
        assert_eq!(store.calls(), &[StoreCall::Delete(9)]);
    }

    #[test]
    fn failing_mutations_leave_records_untouched() {
        let mut store = MemoryStore::new();
        store.fail_mutations(true);
        assert!(store.create(&payload("A")).is_err());
        assert!(store.songs().is_empty());
        assert_eq!(store.calls().len(), 1);
    }
}
