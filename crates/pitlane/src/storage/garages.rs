//! Garage and garage bay queries.

use std::collections::HashMap;

use rusqlite::Row;

use super::{ListQuery, Page, Storage, Table};
use crate::error::Result;
use crate::model::{Garage, GarageBay};

const GARAGES: Table = Table {
    name: "garage",
    select: "g.garage_id, g.team_id, t.name, g.location, g.season_year",
    from: "garage g JOIN team t ON t.team_id = g.team_id",
    key: "g.garage_id",
    fields: &[
        ("garage_id", "g.garage_id"),
        ("team", "g.team_id"),
        ("team_name", "t.name"),
        ("location", "g.location"),
        ("season_year", "g.season_year"),
    ],
};

const GARAGE_BAYS: Table = Table {
    name: "garage bay",
    select: "b.bay_id, b.garage_id, g.location, b.bay_number, b.is_active",
    from: "garage_bay b JOIN garage g ON g.garage_id = b.garage_id",
    key: "b.bay_id",
    fields: &[
        ("bay_id", "b.bay_id"),
        ("garage", "b.garage_id"),
        ("garage_location", "g.location"),
        ("bay_number", "b.bay_number"),
        ("is_active", "b.is_active"),
    ],
};

impl Storage {
    /// List garages, each with its bays.
    ///
    /// Bays for the whole page are loaded with one extra query.
    ///
    /// # Errors
    ///
    /// Returns an error if the query names an unknown field or the database operation fails.
    pub fn list_garages(&self, query: &ListQuery) -> Result<Page<Garage>> {
        let mut page = self.fetch_page(&GARAGES, query, row_to_garage)?;
        self.attach_bays(&mut page.results)?;
        Ok(page)
    }

    /// Get a garage with its bays.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such garage exists.
    pub fn get_garage(&self, id: i64) -> Result<Garage> {
        let mut garage = self.fetch_one(&GARAGES, id, row_to_garage)?;
        self.attach_bays(std::slice::from_mut(&mut garage))?;
        Ok(garage)
    }

    /// List garage bays with their garage location.
    ///
    /// # Errors
    ///
    /// Returns an error if the query names an unknown field or the database operation fails.
    pub fn list_garage_bays(&self, query: &ListQuery) -> Result<Page<GarageBay>> {
        self.fetch_page(&GARAGE_BAYS, query, row_to_bay)
    }

    /// Get a garage bay by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such bay exists.
    pub fn get_garage_bay(&self, id: i64) -> Result<GarageBay> {
        self.fetch_one(&GARAGE_BAYS, id, row_to_bay)
    }

    fn attach_bays(&self, garages: &mut [Garage]) -> Result<()> {
        let ids: Vec<i64> = garages.iter().map(|g| g.garage_id).collect();
        let bays = self.fetch_in(
            &GARAGE_BAYS,
            "b.garage_id",
            &ids,
            " ORDER BY b.bay_number, b.bay_id",
            row_to_bay,
        )?;

        let mut by_garage: HashMap<i64, Vec<GarageBay>> = HashMap::new();
        for bay in bays {
            by_garage.entry(bay.garage_id).or_default().push(bay);
        }
        for garage in garages {
            garage.bays = by_garage.remove(&garage.garage_id).unwrap_or_default();
        }
        Ok(())
    }
}

fn row_to_garage(row: &Row<'_>) -> rusqlite::Result<Garage> {
    Ok(Garage {
        garage_id: row.get(0)?,
        team_id: row.get(1)?,
        team_name: row.get(2)?,
        location: row.get(3)?,
        season_year: row.get(4)?,
        bays: Vec::new(),
    })
}

fn row_to_bay(row: &Row<'_>) -> rusqlite::Result<GarageBay> {
    Ok(GarageBay {
        bay_id: row.get(0)?,
        garage_id: row.get(1)?,
        garage_location: row.get(2)?,
        bay_number: row.get(3)?,
        is_active: row.get(4)?,
    })
}
