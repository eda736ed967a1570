//! Team member queries.

use rusqlite::Row;

use super::{ListQuery, Page, Storage, Table};
use crate::error::Result;
use crate::model::Person;

const PEOPLE: Table = Table {
    name: "person",
    select: "pe.person_id, pe.team_id, pe.first_name, pe.last_name, pe.role, \
             pe.certification_level, t.name",
    from: "person pe JOIN team t ON t.team_id = pe.team_id",
    key: "pe.person_id",
    fields: &[
        ("person_id", "pe.person_id"),
        ("team", "pe.team_id"),
        ("first_name", "pe.first_name"),
        ("last_name", "pe.last_name"),
        ("role", "pe.role"),
        ("certification_level", "pe.certification_level"),
        ("team_name", "t.name"),
    ],
};

impl Storage {
    /// List team members with their team name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query names an unknown field or the database operation fails.
    pub fn list_people(&self, query: &ListQuery) -> Result<Page<Person>> {
        self.fetch_page(&PEOPLE, query, row_to_person)
    }

    /// Get a team member by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such person exists.
    pub fn get_person(&self, id: i64) -> Result<Person> {
        self.fetch_one(&PEOPLE, id, row_to_person)
    }
}

fn row_to_person(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        person_id: row.get(0)?,
        team_id: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        role: row.get(4)?,
        certification_level: row.get(5)?,
        team_name: row.get(6)?,
    })
}
