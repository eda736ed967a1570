//! Race session, car session and telemetry session queries.

use rusqlite::Row;

use super::{ListQuery, Page, Storage, Table};
use crate::error::Result;
use crate::model::{CarSession, Session, TelemetrySession};

const SESSIONS: Table = Table {
    name: "session",
    select: "s.session_id, s.race_name, s.session_type, s.session_date",
    from: "session s",
    key: "s.session_id",
    fields: &[
        ("session_id", "s.session_id"),
        ("race_name", "s.race_name"),
        ("session_type", "s.session_type"),
        ("session_date", "s.session_date"),
    ],
};

const CAR_SESSIONS: Table = Table {
    name: "car session",
    select: "cs.car_session_id, cs.car_id, cs.session_id, cs.bay_id, cs.status, \
             c.car_number, s.race_name, s.session_type, b.bay_number",
    from: "car_session cs \
           JOIN car c ON c.car_id = cs.car_id \
           JOIN session s ON s.session_id = cs.session_id \
           LEFT JOIN garage_bay b ON b.bay_id = cs.bay_id",
    key: "cs.car_session_id",
    fields: &[
        ("car_session_id", "cs.car_session_id"),
        ("car", "cs.car_id"),
        ("session", "cs.session_id"),
        ("bay", "cs.bay_id"),
        ("status", "cs.status"),
        ("car_number", "c.car_number"),
        ("race_name", "s.race_name"),
        ("session_type", "s.session_type"),
        ("session_date", "s.session_date"),
    ],
};

const TELEMETRY_SESSIONS: Table = Table {
    name: "telemetry session",
    select: "ts.telemetry_id, ts.car_session_id, ts.data_location, ts.start_time, ts.end_time",
    from: "telemetry_session ts",
    key: "ts.telemetry_id",
    fields: &[
        ("telemetry_id", "ts.telemetry_id"),
        ("car_session", "ts.car_session_id"),
        ("data_location", "ts.data_location"),
        ("start_time", "ts.start_time"),
        ("end_time", "ts.end_time"),
    ],
};

impl Storage {
    /// List race sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the query names an unknown field or the database operation fails.
    pub fn list_sessions(&self, query: &ListQuery) -> Result<Page<Session>> {
        self.fetch_page(&SESSIONS, query, row_to_session)
    }

    /// Get a race session by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such session exists.
    pub fn get_session(&self, id: i64) -> Result<Session> {
        self.fetch_one(&SESSIONS, id, row_to_session)
    }

    /// List car sessions with car, session and bay fields joined in.
    ///
    /// # Errors
    ///
    /// Returns an error if the query names an unknown field or the database operation fails.
    pub fn list_car_sessions(&self, query: &ListQuery) -> Result<Page<CarSession>> {
        self.fetch_page(&CAR_SESSIONS, query, row_to_car_session)
    }

    /// Get a car session by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such car session exists.
    pub fn get_car_session(&self, id: i64) -> Result<CarSession> {
        self.fetch_one(&CAR_SESSIONS, id, row_to_car_session)
    }

    /// List telemetry sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the query names an unknown field or the database operation fails.
    pub fn list_telemetry_sessions(&self, query: &ListQuery) -> Result<Page<TelemetrySession>> {
        self.fetch_page(&TELEMETRY_SESSIONS, query, row_to_telemetry)
    }

    /// Get a telemetry session by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such telemetry session exists.
    pub fn get_telemetry_session(&self, id: i64) -> Result<TelemetrySession> {
        self.fetch_one(&TELEMETRY_SESSIONS, id, row_to_telemetry)
    }
}

fn row_to_session(row: &Row<'_>) -> rusqlite::Result<Session> {
    Ok(Session {
        session_id: row.get(0)?,
        race_name: row.get(1)?,
        session_type: row.get(2)?,
        session_date: row.get(3)?,
    })
}

fn row_to_car_session(row: &Row<'_>) -> rusqlite::Result<CarSession> {
    Ok(CarSession {
        car_session_id: row.get(0)?,
        car_id: row.get(1)?,
        session_id: row.get(2)?,
        bay_id: row.get(3)?,
        status: row.get(4)?,
        car_number: row.get(5)?,
        race_name: row.get(6)?,
        session_type: row.get(7)?,
        bay_number: row.get(8)?,
    })
}

fn row_to_telemetry(row: &Row<'_>) -> rusqlite::Result<TelemetrySession> {
    Ok(TelemetrySession {
        telemetry_id: row.get(0)?,
        car_session_id: row.get(1)?,
        data_location: row.get(2)?,
        start_time: row.get(3)?,
        end_time: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rusqlite::types::Value;

    use crate::error::Error;
    use crate::storage::fixtures;
    use crate::storage::{Direction, ListQuery, Predicate};

    #[test]
    fn test_order_sessions_by_date() {
        let storage = fixtures::seeded();
        let query = ListQuery::new().order_by("session_date", Direction::Ascending);
        let page = storage.list_sessions(&query).unwrap();

        assert_eq!(page.count, 3);
        assert_eq!(page.results[0].race_name, "British Grand Prix");
        assert_eq!(
            page.results[0].session_date,
            NaiveDate::from_ymd_opt(2024, 7, 6).unwrap()
        );
    }

    #[test]
    fn test_search_sessions_by_race_name() {
        let storage = fixtures::seeded();
        let query = ListQuery::new().search(&["race_name"], "italian");
        let page = storage.list_sessions(&query).unwrap();

        assert_eq!(page.count, 2);
    }

    #[test]
    fn test_car_session_joins_optional_bay() {
        let storage = fixtures::seeded();

        let in_bay = storage.get_car_session(1).unwrap();
        assert_eq!(in_bay.bay_id, Some(1));
        assert_eq!(in_bay.bay_number, Some(1));
        assert_eq!(in_bay.car_number, 16);
        assert_eq!(in_bay.session_type, "FP1");

        let no_bay = storage.get_car_session(2).unwrap();
        assert_eq!(no_bay.bay_id, None);
        assert_eq!(no_bay.bay_number, None);
    }

    #[test]
    fn test_filter_car_sessions_by_status() {
        let storage = fixtures::seeded();
        let query = ListQuery::new().filter(Predicate::Equals(
            "status",
            Value::Text("scheduled".to_string()),
        ));
        let page = storage.list_car_sessions(&query).unwrap();

        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].car_id, 3);
    }

    #[test]
    fn test_telemetry_open_session() {
        let storage = fixtures::seeded();
        let query = ListQuery::new().filter(Predicate::IsNull("end_time", true));
        let page = storage.list_telemetry_sessions(&query).unwrap();

        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].telemetry_id, 2);
        assert!(page.results[0].data_location.contains("silverstone"));
    }

    #[test]
    fn test_get_missing_telemetry_session() {
        let storage = fixtures::seeded();
        let err = storage.get_telemetry_session(99).unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                resource: "telemetry session",
                id: 99
            }
        ));
    }
}
