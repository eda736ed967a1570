//! Team queries.

use rusqlite::Row;

use super::{ListQuery, Page, Storage, Table};
use crate::error::Result;
use crate::model::Team;

const TEAMS: Table = Table {
    name: "team",
    select: "t.team_id, t.name, t.country, t.principal_name",
    from: "team t",
    key: "t.team_id",
    fields: &[
        ("team_id", "t.team_id"),
        ("name", "t.name"),
        ("country", "t.country"),
        ("principal_name", "t.principal_name"),
    ],
};

impl Storage {
    /// List teams.
    ///
    /// # Errors
    ///
    /// Returns an error if the query names an unknown field or the database operation fails.
    pub fn list_teams(&self, query: &ListQuery) -> Result<Page<Team>> {
        self.fetch_page(&TEAMS, query, row_to_team)
    }

    /// Get a team by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such team exists.
    pub fn get_team(&self, id: i64) -> Result<Team> {
        self.fetch_one(&TEAMS, id, row_to_team)
    }
}

fn row_to_team(row: &Row<'_>) -> rusqlite::Result<Team> {
    Ok(Team {
        team_id: row.get(0)?,
        name: row.get(1)?,
        country: row.get(2)?,
        principal_name: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::storage::fixtures;
    use crate::storage::{Direction, ListQuery};

    #[test]
    fn test_list_teams() {
        let storage = fixtures::seeded();
        let page = storage.list_teams(&ListQuery::new()).unwrap();

        assert_eq!(page.count, 2);
        assert_eq!(page.results[0].name, "Scuderia Rossa");
        assert_eq!(page.results[1].principal_name.as_deref(), Some("Toto Wolff"));
    }

    #[test]
    fn test_search_teams_by_country() {
        let storage = fixtures::seeded();
        let query = ListQuery::new().search(&["name", "country"], "germ");
        let page = storage.list_teams(&query).unwrap();

        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].team_id, 2);
    }

    #[test]
    fn test_order_teams_descending() {
        let storage = fixtures::seeded();
        let query = ListQuery::new().order_by("name", Direction::Descending);
        let page = storage.list_teams(&query).unwrap();

        assert_eq!(page.results[0].name, "Silver Arrows");
    }

    #[test]
    fn test_get_team() {
        let storage = fixtures::seeded();
        let team = storage.get_team(1).unwrap();
        assert_eq!(team.country.as_deref(), Some("Italy"));
    }

    #[test]
    fn test_get_missing_team() {
        let storage = fixtures::seeded();
        let err = storage.get_team(99).unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "team", id: 99 }));
    }
}
