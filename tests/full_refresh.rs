//! The collection shown to the user must always be exactly what the backend
//! last listed, never a locally patched copy.

use song_shelf::{
    FormController, FormMode, ImagePolicy, MemoryStore, SongField, StoreCall, SyncOrchestrator,
};

fn assert_mirrors_store(sync: &SyncOrchestrator<MemoryStore>) {
    assert_eq!(sync.songs(), sync.store().songs());
    assert_eq!(sync.store().calls().last(), Some(&StoreCall::List));
}

#[test]
fn every_action_ends_with_a_list_call() {
    let mut sync = SyncOrchestrator::new(MemoryStore::new(), ImagePolicy::Omit);
    let mut form = FormController::new();
    assert!(sync.refresh());
    assert!(sync.songs().is_empty());

    for name in ["Kyrie", "Gloria", "Credo"] {
        form.set_field(SongField::Name, name);
        form.set_field(SongField::Performer, "Choir");
        sync.submit(&mut form);
        assert_mirrors_store(&sync);
    }
    assert_eq!(sync.songs().len(), 3);

    let gloria = sync.songs()[1].clone();
    form.enter_edit_mode(&gloria);
    form.set_field(SongField::Description, "Second movement");
    sync.submit(&mut form);
    assert_mirrors_store(&sync);
    assert_eq!(sync.songs()[1].description, "Second movement");
    assert_eq!(form.mode(), FormMode::Create);

    let first = sync.songs()[0].id;
    sync.delete_record(first);
    assert_mirrors_store(&sync);
    assert_eq!(sync.songs().len(), 2);

    // Deleting something already gone fails server-side but still refreshes.
    assert!(!sync.delete_record(first));
    assert_mirrors_store(&sync);
}

#[test]
fn server_side_changes_show_up_after_any_mutation() {
    let mut sync = SyncOrchestrator::new(MemoryStore::new(), ImagePolicy::Omit);
    let mut form = FormController::new();

    // Another client adds a record behind our back.
    {
        use song_shelf::RecordStore;
        let payload = song_shelf::SongDraft {
            name: "From elsewhere".into(),
            ..Default::default()
        }
        .to_payload(None);
        sync.store_mut().create(&payload).unwrap();
    }
    assert!(sync.songs().is_empty());

    form.set_field(SongField::Name, "Ours");
    sync.submit(&mut form);

    let names: Vec<&str> = sync.songs().iter().map(|song| song.name.as_str()).collect();
    assert_eq!(names, vec!["From elsewhere", "Ours"]);
}

#[test]
fn failed_refresh_keeps_the_last_good_list() {
    let mut sync = SyncOrchestrator::new(MemoryStore::new(), ImagePolicy::Omit);
    let mut form = FormController::new();
    form.set_field(SongField::Name, "Kept");
    sync.submit(&mut form);
    let before = sync.songs().to_vec();

    sync.store_mut().fail_list(true);
    form.set_field(SongField::Name, "Saved but unseen");
    sync.submit(&mut form);

    assert_eq!(sync.songs(), before.as_slice());
    assert_eq!(sync.store().songs().len(), 2);
}
