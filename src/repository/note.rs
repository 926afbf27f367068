use diesel::prelude::*;

use crate::domain::note::{NewNote, Note};
use crate::models::note::{NewNote as DbNewNote, Note as DbNote};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, NoteReader, NoteWriter};

impl NoteReader for DieselRepository {
    fn list_notes(&self) -> RepositoryResult<Vec<Note>> {
        use crate::schema::notes;

        let mut conn = self.conn()?;

        let notes = notes::table
            .order((notes::name.asc(), notes::id.asc()))
            .load::<DbNote>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Note>, _>>()?;

        Ok(notes)
    }
}

impl NoteWriter for DieselRepository {
    fn create_note(&self, note: &NewNote) -> RepositoryResult<Note> {
        use crate::schema::notes;

        let mut conn = self.conn()?;
        let db_note: DbNewNote = note.clone().into();

        let created = diesel::insert_into(notes::table)
            .values(db_note)
            .get_result::<DbNote>(&mut conn)?;

        Ok(created.try_into()?)
    }
}
