//! Form state for the add/edit panel. The create and edit drafts are stored
//! separately so switching into edit mode never clobbers a half-typed new
//! song, and the mode decides which of the two the keyboard is bound to.

use crate::models::{Song, SongDraft};

/// Which backend operation a submission maps to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    /// Editing the record with this identifier. Zero is a perfectly valid id.
    Edit { id: i64 },
}

/// Fields of the song form, in tab order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SongField {
    #[default]
    Name,
    Performer,
    Description,
    ReleaseYear,
}

impl SongField {
    pub const ALL: [SongField; 4] = [
        SongField::Name,
        SongField::Performer,
        SongField::Description,
        SongField::ReleaseYear,
    ];

    /// Label rendered in front of the input.
    pub fn label(self) -> &'static str {
        match self {
            SongField::Name => "Name",
            SongField::Performer => "Performer",
            SongField::Description => "Description",
            SongField::ReleaseYear => "Release year",
        }
    }

    /// Hint shown while the field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            SongField::Name => "Song name...",
            SongField::Performer => "Song performer...",
            SongField::Description => "Song description...",
            SongField::ReleaseYear => "Release year...",
        }
    }

    fn next(self) -> Self {
        match self {
            SongField::Name => SongField::Performer,
            SongField::Performer => SongField::Description,
            SongField::Description => SongField::ReleaseYear,
            SongField::ReleaseYear => SongField::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            SongField::Name => SongField::ReleaseYear,
            SongField::Performer => SongField::Name,
            SongField::Description => SongField::Performer,
            SongField::ReleaseYear => SongField::Description,
        }
    }
}

impl SongDraft {
    /// Read a single field.
    pub fn field(&self, field: SongField) -> &str {
        match field {
            SongField::Name => &self.name,
            SongField::Performer => &self.performer,
            SongField::Description => &self.description,
            SongField::ReleaseYear => &self.release_year,
        }
    }

    fn field_mut(&mut self, field: SongField) -> &mut String {
        match field {
            SongField::Name => &mut self.name,
            SongField::Performer => &mut self.performer,
            SongField::Description => &mut self.description,
            SongField::ReleaseYear => &mut self.release_year,
        }
    }
}

/// Holds both drafts, the mode flag and the keyboard focus.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    mode: FormMode,
    create: SongDraft,
    edit: SongDraft,
    active: SongField,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn create_draft(&self) -> &SongDraft {
        &self.create
    }

    pub fn edit_draft(&self) -> &SongDraft {
        &self.edit
    }

    /// The draft currently bound to the inputs.
    pub fn active_draft(&self) -> &SongDraft {
        match self.mode {
            FormMode::Create => &self.create,
            FormMode::Edit { .. } => &self.edit,
        }
    }

    fn active_draft_mut(&mut self) -> &mut SongDraft {
        match self.mode {
            FormMode::Create => &mut self.create,
            FormMode::Edit { .. } => &mut self.edit,
        }
    }

    /// Field that receives typed characters.
    pub fn active_field(&self) -> SongField {
        self.active
    }

    /// Overwrite one field of the active draft.
    pub fn set_field(&mut self, field: SongField, value: impl Into<String>) {
        *self.active_draft_mut().field_mut(field) = value.into();
    }

    /// Switch focus to a particular field.
    pub fn focus(&mut self, field: SongField) {
        self.active = field;
    }

    pub fn next_field(&mut self) {
        self.active = self.active.next();
    }

    pub fn previous_field(&mut self) {
        self.active = self.active.previous();
    }

    /// Insert a character into the focused field. Control characters are
    /// rejected.
    pub fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let field = self.active;
        self.active_draft_mut().field_mut(field).push(ch);
        true
    }

    /// Remove the last character of the focused field.
    pub fn backspace(&mut self) {
        let field = self.active;
        self.active_draft_mut().field_mut(field).pop();
    }

    /// Start editing `song`: the edit draft receives a copy of its fields.
    pub fn enter_edit_mode(&mut self, song: &Song) {
        self.mode = FormMode::Edit { id: song.id };
        self.edit = SongDraft::from_song(song);
        self.active = SongField::Name;
    }

    /// Leave edit mode and forget the edit draft.
    pub fn cancel_edit(&mut self) {
        self.mode = FormMode::Create;
        self.edit = SongDraft::default();
        self.active = SongField::Name;
    }

    /// Reset the create draft after a submission.
    pub fn clear_create_fields(&mut self) {
        self.create = SongDraft::default();
        if !self.is_editing() {
            self.active = SongField::Name;
        }
    }

    /// Drop edit mode when its target is no longer part of `songs`. Returns
    /// `true` when the edit was cancelled.
    pub fn reconcile(&mut self, songs: &[Song]) -> bool {
        match self.mode {
            FormMode::Edit { id } if !songs.iter().any(|song| song.id == id) => {
                self.cancel_edit();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: i64, name: &str) -> Song {
        Song {
            id,
            name: name.to_string(),
            performer: format!("{name} performer"),
            description: format!("{name} description"),
            release_year: "1984".to_string(),
            created_at: None,
            image: String::new(),
        }
    }

    #[test]
    fn enter_edit_mode_copies_record_fields() {
        let mut form = FormController::new();
        let record = song(3, "Canon");
        form.enter_edit_mode(&record);

        assert_eq!(form.mode(), FormMode::Edit { id: 3 });
        assert_eq!(form.edit_draft(), &SongDraft::from_song(&record));
        assert_eq!(form.active_draft().name, "Canon");
        assert_eq!(form.active_draft().performer, "Canon performer");
        assert_eq!(form.active_draft().description, "Canon description");
        assert_eq!(form.active_draft().release_year, "1984");
    }

    #[test]
    fn cancel_edit_returns_to_empty_create_state() {
        let mut form = FormController::new();
        form.enter_edit_mode(&song(1, "A"));
        form.set_field(SongField::Description, "changed");
        form.next_field();
        form.cancel_edit();

        assert_eq!(form.mode(), FormMode::Create);
        assert!(form.edit_draft().is_empty());
        assert_eq!(form.active_field(), SongField::Name);
    }

    #[test]
    fn drafts_are_kept_per_mode() {
        let mut form = FormController::new();
        for ch in "New".chars() {
            form.push_char(ch);
        }
        form.enter_edit_mode(&song(2, "Old"));
        form.push_char('!');
        assert_eq!(form.edit_draft().name, "Old!");
        assert_eq!(form.create_draft().name, "New");

        form.cancel_edit();
        assert_eq!(form.active_draft().name, "New");
    }

    #[test]
    fn keyboard_edits_target_the_focused_field() {
        let mut form = FormController::new();
        form.next_field();
        form.next_field();
        form.next_field();
        assert_eq!(form.active_field(), SongField::ReleaseYear);
        assert!(form.push_char('1'));
        assert!(!form.push_char('\n'));
        form.push_char('9');
        form.backspace();
        assert_eq!(form.create_draft().release_year, "1");

        form.next_field();
        assert_eq!(form.active_field(), SongField::Name);
        form.previous_field();
        assert_eq!(form.active_field(), SongField::ReleaseYear);
    }

    #[test]
    fn clear_create_fields_leaves_edit_state_alone() {
        let mut form = FormController::new();
        form.set_field(SongField::Name, "draft");
        form.enter_edit_mode(&song(5, "E"));
        form.clear_create_fields();

        assert!(form.create_draft().is_empty());
        assert_eq!(form.mode(), FormMode::Edit { id: 5 });
        assert_eq!(form.edit_draft().name, "E");
    }

    #[test]
    fn reconcile_cancels_edit_of_vanished_record() {
        let mut form = FormController::new();
        form.enter_edit_mode(&song(4, "Gone"));

        assert!(!form.reconcile(&[song(4, "Gone"), song(5, "Other")]));
        assert!(form.is_editing());

        assert!(form.reconcile(&[song(5, "Other")]));
        assert_eq!(form.mode(), FormMode::Create);
        assert!(form.edit_draft().is_empty());
    }

    #[test]
    fn zero_id_is_a_real_edit_target() {
        let mut form = FormController::new();
        form.enter_edit_mode(&song(0, "Zero"));
        assert_eq!(form.mode(), FormMode::Edit { id: 0 });
        assert!(!form.reconcile(&[song(0, "Zero")]));
    }
}
