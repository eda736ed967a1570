//! Part and part installation queries, plus the store side of lifecycle
//! derivation.

use std::collections::HashMap;

use rusqlite::types::Value;
use rusqlite::Row;

use super::{Direction, ListQuery, Page, Predicate, Storage, Table};
use crate::error::Result;
use crate::lifecycle::{self, PartLifecycle};
use crate::model::{CarPart, Part};

const PARTS: Table = Table {
    name: "part",
    select: "p.part_id, p.part_type, p.serial_number, p.fia_lifecycle_limit, p.manufacturer",
    from: "part p",
    key: "p.part_id",
    fields: &[
        ("part_id", "p.part_id"),
        ("part_type", "p.part_type"),
        ("serial_number", "p.serial_number"),
        ("fia_lifecycle_limit", "p.fia_lifecycle_limit"),
        ("manufacturer", "p.manufacturer"),
    ],
};

const CAR_PARTS: Table = Table {
    name: "car part",
    select: "cp.car_part_id, cp.car_id, cp.part_id, c.car_number, c.chassis_number, \
             p.part_type, p.serial_number, p.manufacturer, p.fia_lifecycle_limit, \
             cp.installed_at, cp.removed_at, cp.mileage",
    from: "car_part cp \
           JOIN car c ON c.car_id = cp.car_id \
           JOIN part p ON p.part_id = cp.part_id",
    key: "cp.car_part_id",
    fields: &[
        ("car_part_id", "cp.car_part_id"),
        ("car", "cp.car_id"),
        ("part", "cp.part_id"),
        ("car_number", "c.car_number"),
        ("chassis_number", "c.chassis_number"),
        ("part_type", "p.part_type"),
        ("serial_number", "p.serial_number"),
        ("manufacturer", "p.manufacturer"),
        ("installed_at", "cp.installed_at"),
        ("removed_at", "cp.removed_at"),
        ("mileage", "cp.mileage"),
    ],
};

impl Storage {
    /// List parts.
    ///
    /// # Errors
    ///
    /// Returns an error if the query names an unknown field or the database operation fails.
    pub fn list_parts(&self, query: &ListQuery) -> Result<Page<Part>> {
        self.fetch_page(&PARTS, query, row_to_part)
    }

    /// Get a part by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such part exists.
    pub fn get_part(&self, id: i64) -> Result<Part> {
        self.fetch_one(&PARTS, id, row_to_part)
    }

    /// List installation records with car and part fields joined in.
    ///
    /// # Errors
    ///
    /// Returns an error if the query names an unknown field or the database operation fails.
    pub fn list_car_parts(&self, query: &ListQuery) -> Result<Page<CarPart>> {
        self.fetch_page(&CAR_PARTS, query, row_to_car_part)
    }

    /// List installations that have not been removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_active_car_parts(&self, query: ListQuery) -> Result<Page<CarPart>> {
        let query = query.filter(Predicate::IsNull("removed_at", true));
        self.list_car_parts(&query)
    }

    /// List the installation history of one car, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_car_parts_by_car(&self, car_id: i64, query: ListQuery) -> Result<Page<CarPart>> {
        let query = query
            .filter(Predicate::Equals("car", Value::Integer(car_id)))
            .order_by("installed_at", Direction::Descending);
        self.list_car_parts(&query)
    }

    /// Get an installation record by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such record exists.
    pub fn get_car_part(&self, id: i64) -> Result<CarPart> {
        self.fetch_one(&CAR_PARTS, id, row_to_car_part)
    }

    /// Every installation record of one part, in the store's natural order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn installations_for_part(&self, part_id: i64) -> Result<Vec<CarPart>> {
        self.fetch_in(&CAR_PARTS, "cp.part_id", &[part_id], "", row_to_car_part)
    }

    /// Active installation of each of the given parts, keyed by part id.
    ///
    /// Parts that are not fitted are absent from the map. Ids are looked up
    /// in large batches rather than one query per part.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn active_installations(&self, part_ids: &[i64]) -> Result<HashMap<i64, CarPart>> {
        let rows = self.fetch_in(&CAR_PARTS, "cp.part_id", part_ids, "", row_to_car_part)?;

        let mut by_part: HashMap<i64, Vec<CarPart>> = HashMap::new();
        for row in rows {
            by_part.entry(row.part_id).or_default().push(row);
        }

        Ok(by_part
            .into_iter()
            .filter_map(|(part_id, rows)| {
                lifecycle::active_installation(&rows)
                    .cloned()
                    .map(|active| (part_id, active))
            })
            .collect())
    }

    /// Derive lifecycle values for one part.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn assess_part(&self, part: &Part) -> Result<PartLifecycle> {
        let installations = self.installations_for_part(part.part_id)?;
        let active = lifecycle::active_installation(&installations);
        Ok(PartLifecycle::assess(part, active))
    }

    /// Derive lifecycle values for a batch of parts, in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn assess_parts(&self, parts: &[Part]) -> Result<Vec<PartLifecycle>> {
        let ids: Vec<i64> = parts.iter().map(|p| p.part_id).collect();
        let active = self.active_installations(&ids)?;
        Ok(parts
            .iter()
            .map(|part| PartLifecycle::assess(part, active.get(&part.part_id)))
            .collect())
    }

    /// Parts whose wear has reached the replacement threshold, by part id.
    ///
    /// Parts without a lifecycle limit are excluded by the query itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn lifecycle_warnings(&self) -> Result<Vec<(Part, PartLifecycle)>> {
        let query = ListQuery::new().filter(Predicate::IsNull("fia_lifecycle_limit", false));
        let parts = self.list_parts(&query)?.results;

        let ids: Vec<i64> = parts.iter().map(|p| p.part_id).collect();
        let active = self.active_installations(&ids)?;

        Ok(lifecycle::lifecycle_warnings(parts, &active))
    }
}

fn row_to_part(row: &Row<'_>) -> rusqlite::Result<Part> {
    Ok(Part {
        part_id: row.get(0)?,
        part_type: row.get(1)?,
        serial_number: row.get(2)?,
        fia_lifecycle_limit: row.get(3)?,
        manufacturer: row.get(4)?,
    })
}

fn row_to_car_part(row: &Row<'_>) -> rusqlite::Result<CarPart> {
    Ok(CarPart {
        car_part_id: row.get(0)?,
        car_id: row.get(1)?,
        part_id: row.get(2)?,
        car_number: row.get(3)?,
        chassis_number: row.get(4)?,
        part_type: row.get(5)?,
        serial_number: row.get(6)?,
        manufacturer: row.get(7)?,
        fia_lifecycle_limit: row.get(8)?,
        installed_at: row.get(9)?,
        removed_at: row.get(10)?,
        mileage: row.get(11)?,
    })
}
