use serde::{Deserialize, Serialize};

use crate::domain::types::{NoteId, NoteName};

/// Free-form named note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: NoteId,
    pub name: NoteName,
    pub description: String,
}

/// Data required to insert a new [`Note`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewNote {
    pub name: NoteName,
    pub description: String,
}
