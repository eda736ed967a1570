//! Seed data shared by the storage and API tests.
//!
//! Parts and their installations are chosen to cover every lifecycle case:
//!
//! | part | limit | active mileage | wear    |
//! |------|-------|----------------|---------|
//! | 1    | 1000  | 850            | 85.0    |
//! | 2    | 1000  | 799            | 79.9    |
//! | 3    | none  | 500            | unknown |
//! | 4    | 2000  | removed (1900) | 0       |
//! | 5    | 1000  | no reading     | 0       |

use std::path::Path;

use super::Storage;

const SEED_SQL: &str = r"
INSERT INTO team (team_id, name, country, principal_name) VALUES
    (1, 'Scuderia Rossa', 'Italy', 'Fred Vasseur'),
    (2, 'Silver Arrows', 'Germany', 'Toto Wolff');

INSERT INTO person (person_id, team_id, first_name, last_name, role, certification_level) VALUES
    (1, 1, 'Ada', 'Lovelace', 'Engineer', 'L3'),
    (2, 1, 'Juan', 'Fangio', 'Mechanic', 'L2'),
    (3, 2, 'Grace', 'Hopper', 'Engineer', NULL);

INSERT INTO garage (garage_id, team_id, location, season_year) VALUES
    (1, 1, 'Monza', 2024),
    (2, 2, 'Silverstone', 2024),
    (3, 1, 'Monaco', 2023);

INSERT INTO garage_bay (bay_id, garage_id, bay_number, is_active) VALUES
    (1, 1, 1, 1),
    (2, 1, 2, 0),
    (3, 2, 1, 1);

INSERT INTO car (car_id, team_id, car_number, chassis_number, status) VALUES
    (1, 1, 16, 'SF-24-01', 'active'),
    (2, 1, 55, 'SF-24-02', 'maintenance'),
    (3, 2, 44, 'W15-01', 'active');

INSERT INTO part (part_id, part_type, serial_number, fia_lifecycle_limit, manufacturer) VALUES
    (1, 'Gearbox', 'GB-001', 1000, 'Xtrac'),
    (2, 'Power Unit', 'PU-001', 1000, 'Ferrari'),
    (3, 'Brake Disc', 'BD-001', NULL, 'Brembo'),
    (4, 'Gearbox', 'GB-002', 2000, 'Xtrac'),
    (5, 'Turbocharger', 'TC-001', 1000, NULL);

INSERT INTO car_part (car_part_id, car_id, part_id, installed_at, removed_at, mileage) VALUES
    (1, 1, 1, '2024-03-01 09:00:00', NULL, 850),
    (2, 1, 2, '2024-03-02 09:00:00', NULL, 799),
    (3, 2, 3, '2024-03-03 09:00:00', NULL, 500),
    (4, 2, 4, '2024-02-01 09:00:00', '2024-03-10 18:00:00', 1900),
    (5, 3, 5, '2024-03-05 09:00:00', NULL, NULL);

INSERT INTO session (session_id, race_name, session_type, session_date) VALUES
    (1, 'Italian Grand Prix', 'FP1', '2024-08-30'),
    (2, 'Italian Grand Prix', 'R', '2024-09-01'),
    (3, 'British Grand Prix', 'Q', '2024-07-06');

INSERT INTO car_session (car_session_id, car_id, session_id, bay_id, status) VALUES
    (1, 1, 1, 1, 'completed'),
    (2, 3, 3, NULL, 'scheduled');

INSERT INTO telemetry_session (telemetry_id, car_session_id, data_location, start_time, end_time) VALUES
    (1, 1, 's3://telemetry/monza/fp1-16.parquet', '2024-08-30 13:30:00', '2024-08-30 14:30:00'),
    (2, 2, 's3://telemetry/silverstone/q-44.parquet', '2024-07-06 15:00:00', NULL);

INSERT INTO work_order (work_order_id, car_id, session_id, description, created_at, completed_at) VALUES
    (1, 1, 1, 'Replace gearbox after FP1', '2024-08-30 15:00:00', NULL),
    (2, 2, NULL, 'Brake wear inspection', '2024-08-01 10:00:00', '2024-08-02 10:00:00');

INSERT INTO work_assignment (work_assignment_id, work_order_id, person_id, role) VALUES
    (1, 1, 2, 'Lead'),
    (2, 1, 1, 'Support'),
    (3, 2, 2, 'Lead');
";

/// Insert the seed rows into an initialized database.
pub(crate) fn seed(storage: &Storage) {
    storage
        .conn
        .execute_batch(SEED_SQL)
        .expect("failed to seed test database");
}

/// An in-memory database with the seed rows.
pub(crate) fn seeded() -> Storage {
    let storage = Storage::open_in_memory().expect("failed to create test storage");
    seed(&storage);
    storage
}

/// A database file at `path` with the seed rows.
pub(crate) fn seeded_file(path: &Path) {
    let storage = Storage::open(path).expect("failed to create test database file");
    seed(&storage);
}

/// Add a second active installation for part 1, breaking the one-active-row
/// assumption.
pub(crate) fn add_duplicate_active_installation(storage: &Storage) {
    storage
        .conn
        .execute(
            "INSERT INTO car_part (car_part_id, car_id, part_id, installed_at, removed_at, mileage)
             VALUES (6, 3, 1, '2024-04-01 09:00:00', NULL, 10)",
            [],
        )
        .expect("failed to insert duplicate installation");
}

/// Add `count` unfitted parts with a lifecycle limit of 1000, numbered from
/// part id 1001, then fit the last one to car 1 at 950 km.
pub(crate) fn add_limited_parts(storage: &Storage, count: i64) {
    let last = 1000 + count;
    storage
        .conn
        .execute_batch(&format!(
            "INSERT INTO part (part_id, part_type, serial_number, fia_lifecycle_limit)
             WITH RECURSIVE n(i) AS (SELECT 1001 UNION ALL SELECT i + 1 FROM n WHERE i < {last})
             SELECT i, 'Wheel Nut', 'WN-' || i, 1000 FROM n;
             INSERT INTO car_part (car_id, part_id, installed_at, removed_at, mileage)
             VALUES (1, {last}, '2024-05-01 09:00:00', NULL, 950);"
        ))
        .expect("failed to insert limited parts");
}
