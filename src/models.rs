//! Domain models exchanged with the song backend. `Song` mirrors the JSON
//! records the server hands back, while `SongDraft` is the editable subset the
//! form works with. Keeping the two apart means the form never has to care
//! about server-assigned fields such as the id or the creation timestamp.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A song record as stored by the backend.
pub struct Song {
    /// Server-assigned identifier. Stable for the lifetime of the record and
    /// used as the key for updates, deletes and list rendering.
    pub id: i64,
    /// Title shown in bold on the song card.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub performer: String,
    #[serde(default)]
    pub description: String,
    /// Free text on purpose: the backend stores whatever the user typed.
    #[serde(default)]
    pub release_year: String,
    /// Server-assigned timestamp. Older records created through the minimal
    /// add form never received one, so it stays optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Picture URL, possibly generated client-side when the song was saved.
    #[serde(default)]
    pub image: String,
}

impl Song {
    /// `Name - Performer`, or just the name when no performer was given.
    pub fn display_title(&self) -> String {
        if self.performer.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, self.performer)
        }
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_title())
    }
}

/// The four free-text fields a user can type into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongDraft {
    pub name: String,
    pub performer: String,
    pub description: String,
    pub release_year: String,
}

impl SongDraft {
    /// Copy the editable fields of an existing record.
    pub fn from_song(song: &Song) -> Self {
        Self {
            name: song.name.clone(),
            performer: song.performer.clone(),
            description: song.description.clone(),
            release_year: song.release_year.clone(),
        }
    }

    /// Whether every field is empty.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.performer.is_empty()
            && self.description.is_empty()
            && self.release_year.is_empty()
    }

    /// Build the request body sent on create and update.
    pub fn to_payload(&self, image: Option<String>) -> SongPayload {
        SongPayload {
            name: self.name.clone(),
            performer: self.performer.clone(),
            description: self.description.clone(),
            release_year: self.release_year.clone(),
            image,
        }
    }
}

/// JSON body for `POST /songs` and `PUT /songs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongPayload {
    pub name: String,
    pub performer: String,
    pub description: String,
    pub release_year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_fields_default_when_missing() {
        let song: Song = serde_json::from_str(r#"{"id": 7, "name": "Greensleeves"}"#).unwrap();
        assert_eq!(song.id, 7);
        assert_eq!(song.name, "Greensleeves");
        assert!(song.performer.is_empty());
        assert!(song.release_year.is_empty());
        assert_eq!(song.created_at, None);
    }

    #[test]
    fn song_reads_camel_case_keys() {
        let song: Song = serde_json::from_str(
            r#"{"id": 1, "name": "A", "performer": "B", "description": "C",
                "releaseYear": "1599", "createdAt": "2024-12-04T10:00:00Z",
                "image": "https://example.test/1.jpg"}"#,
        )
        .unwrap();
        assert_eq!(song.release_year, "1599");
        assert_eq!(song.created_at.as_deref(), Some("2024-12-04T10:00:00Z"));
        assert_eq!(song.image, "https://example.test/1.jpg");
    }

    #[test]
    fn payload_omits_missing_image() {
        let draft = SongDraft {
            name: "A".into(),
            performer: "B".into(),
            description: "C".into(),
            release_year: "1990".into(),
        };
        let value = serde_json::to_value(draft.to_payload(None)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "A",
                "performer": "B",
                "description": "C",
                "releaseYear": "1990",
            })
        );

        let value = serde_json::to_value(draft.to_payload(Some("x.jpg".into()))).unwrap();
        assert_eq!(value["image"], "x.jpg");
    }

    #[test]
    fn display_title_skips_blank_performer() {
        let mut song = Song {
            id: 1,
            name: "Scarborough Fair".into(),
            performer: "  ".into(),
            description: String::new(),
            release_year: String::new(),
            created_at: None,
            image: String::new(),
        };
        assert_eq!(song.display_title(), "Scarborough Fair");
        song.performer = "Anon".into();
        assert_eq!(song.to_string(), "Scarborough Fair - Anon");
    }
}
