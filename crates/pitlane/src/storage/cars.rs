//! Car queries.

use rusqlite::Row;

use super::{ListQuery, Page, Storage, Table};
use crate::error::Result;
use crate::model::Car;

const CARS: Table = Table {
    name: "car",
    select: "c.car_id, c.car_number, c.chassis_number, c.status, c.team_id, t.name",
    from: "car c JOIN team t ON t.team_id = c.team_id",
    key: "c.car_id",
    fields: &[
        ("car_id", "c.car_id"),
        ("car_number", "c.car_number"),
        ("chassis_number", "c.chassis_number"),
        ("status", "c.status"),
        ("team", "c.team_id"),
        ("team_name", "t.name"),
    ],
};

impl Storage {
    /// List cars with their team name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query names an unknown field or the database operation fails.
    pub fn list_cars(&self, query: &ListQuery) -> Result<Page<Car>> {
        self.fetch_page(&CARS, query, row_to_car)
    }

    /// Get a car by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such car exists.
    pub fn get_car(&self, id: i64) -> Result<Car> {
        self.fetch_one(&CARS, id, row_to_car)
    }
}

fn row_to_car(row: &Row<'_>) -> rusqlite::Result<Car> {
    Ok(Car {
        car_id: row.get(0)?,
        car_number: row.get(1)?,
        chassis_number: row.get(2)?,
        status: row.get(3)?,
        team_id: row.get(4)?,
        team_name: row.get(5)?,
    })
}
