use diesel::prelude::*;

use crate::domain::note::{NewNote as DomainNewNote, Note as DomainNote};
use crate::domain::types::{NoteName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::notes)]
pub struct Note {
    pub id: i32,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::notes)]
pub struct NewNote {
    pub name: String,
    pub description: String,
}

impl TryFrom<Note> for DomainNote {
    type Error = TypeConstraintError;

    fn try_from(note: Note) -> Result<Self, Self::Error> {
        Ok(Self {
            id: note.id.try_into()?,
            name: NoteName::new(note.name)?,
            description: note.description,
        })
    }
}

impl From<DomainNewNote> for NewNote {
    fn from(note: DomainNewNote) -> Self {
        Self {
            name: note.name.into_inner(),
            description: note.description,
        }
    }
}
