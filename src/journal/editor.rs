use crate::models::JournalEntry;

/// Local editor state: the draft under composition and, when editing, the
/// entry being rewritten. Purely client-side; mutating it never touches the
/// store or the network.
#[derive(Debug, Default, Clone)]
pub struct EditorState {
    pub draft: String,
    pub editing: Option<JournalEntry>,
}

impl EditorState {
    pub fn begin_edit(&mut self, entry: &JournalEntry) {
        self.editing = Some(entry.clone());
        self.draft = entry.text.clone();
    }

    pub fn reset(&mut self) {
        self.draft.clear();
        self.editing = None;
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}
