//! Ratatui front-end: the add/edit form on top, the song cards below.

mod app;
mod cards;
mod forms;
mod helpers;
mod terminal;

pub use app::{App, Focus};
pub use cards::{song_cards, CardAction, CardActionKind, SongCard};
pub use terminal::run_app;
