pub mod entry;
pub mod user;

pub use entry::{sort_newest_first, Emotion, EntryPatch, JournalEntry, NewEntry};
pub use user::UserSession;
