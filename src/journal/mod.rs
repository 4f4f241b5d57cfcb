pub mod controller;
pub mod editor;

pub use controller::{ConfirmDelete, JournalController, SaveError, SaveOutcome};
pub use editor::EditorState;
