//! `SQLite` schema definitions for pitlane.
//!
//! The API only reads these tables; the statements exist so an empty
//! database can be bootstrapped (`pitlane db init`) and for tests.

/// SQL statement to create the team table.
pub const CREATE_TEAM_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS team (
    team_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    country TEXT,
    principal_name TEXT
)
";

/// SQL statement to create the person table.
pub const CREATE_PERSON_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS person (
    person_id INTEGER PRIMARY KEY AUTOINCREMENT,
    team_id INTEGER NOT NULL REFERENCES team(team_id) ON DELETE CASCADE,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    role TEXT NOT NULL,
    certification_level TEXT
)
";

/// SQL statement to create the garage table.
pub const CREATE_GARAGE_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS garage (
    garage_id INTEGER PRIMARY KEY AUTOINCREMENT,
    team_id INTEGER NOT NULL REFERENCES team(team_id) ON DELETE CASCADE,
    location TEXT NOT NULL,
    season_year INTEGER NOT NULL
)
";

/// SQL statement to create the garage bay table.
pub const CREATE_GARAGE_BAY_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS garage_bay (
    bay_id INTEGER PRIMARY KEY AUTOINCREMENT,
    garage_id INTEGER NOT NULL REFERENCES garage(garage_id) ON DELETE CASCADE,
    bay_number INTEGER NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1
)
";

/// SQL statement to create the car table.
pub const CREATE_CAR_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS car (
    car_id INTEGER PRIMARY KEY AUTOINCREMENT,
    team_id INTEGER NOT NULL REFERENCES team(team_id) ON DELETE CASCADE,
    car_number INTEGER NOT NULL,
    chassis_number TEXT NOT NULL UNIQUE,
    status TEXT NOT NULL
)
";

/// SQL statement to create the part table.
pub const CREATE_PART_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS part (
    part_id INTEGER PRIMARY KEY AUTOINCREMENT,
    part_type TEXT NOT NULL,
    serial_number TEXT NOT NULL UNIQUE,
    fia_lifecycle_limit INTEGER,
    manufacturer TEXT
)
";

/// SQL statement to create the part installation table.
pub const CREATE_CAR_PART_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS car_part (
    car_part_id INTEGER PRIMARY KEY AUTOINCREMENT,
    car_id INTEGER NOT NULL REFERENCES car(car_id) ON DELETE CASCADE,
    part_id INTEGER NOT NULL REFERENCES part(part_id) ON DELETE CASCADE,
    installed_at TEXT NOT NULL,
    removed_at TEXT,
    mileage INTEGER
)
";

/// SQL statement to create the session table.
pub const CREATE_SESSION_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS session (
    session_id INTEGER PRIMARY KEY AUTOINCREMENT,
    race_name TEXT NOT NULL,
    session_type TEXT NOT NULL,
    session_date TEXT NOT NULL
)
";

/// SQL statement to create the car session table.
pub const CREATE_CAR_SESSION_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS car_session (
    car_session_id INTEGER PRIMARY KEY AUTOINCREMENT,
    car_id INTEGER NOT NULL REFERENCES car(car_id) ON DELETE CASCADE,
    session_id INTEGER NOT NULL REFERENCES session(session_id) ON DELETE CASCADE,
    bay_id INTEGER REFERENCES garage_bay(bay_id) ON DELETE SET NULL,
    status TEXT NOT NULL
)
";

/// SQL statement to create the telemetry session table.
pub const CREATE_TELEMETRY_SESSION_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS telemetry_session (
    telemetry_id INTEGER PRIMARY KEY AUTOINCREMENT,
    car_session_id INTEGER NOT NULL REFERENCES car_session(car_session_id) ON DELETE CASCADE,
    data_location TEXT NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT
)
";

/// SQL statement to create the work order table.
pub const CREATE_WORK_ORDER_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS work_order (
    work_order_id INTEGER PRIMARY KEY AUTOINCREMENT,
    car_id INTEGER NOT NULL REFERENCES car(car_id) ON DELETE CASCADE,
    session_id INTEGER REFERENCES session(session_id) ON DELETE SET NULL,
    description TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    completed_at TEXT
)
";

/// SQL statement to create the work assignment table.
pub const CREATE_WORK_ASSIGNMENT_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS work_assignment (
    work_assignment_id INTEGER PRIMARY KEY AUTOINCREMENT,
    work_order_id INTEGER NOT NULL REFERENCES work_order(work_order_id) ON DELETE CASCADE,
    person_id INTEGER NOT NULL REFERENCES person(person_id) ON DELETE CASCADE,
    role TEXT NOT NULL
)
";

/// Index for active-installation lookups by part.
pub const CREATE_CAR_PART_PART_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_car_part_part ON car_part(part_id, removed_at)
";

/// Index for installation history by car.
pub const CREATE_CAR_PART_CAR_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_car_part_car ON car_part(car_id, installed_at DESC)
";

/// Index for loading the bays of a page of garages.
pub const CREATE_GARAGE_BAY_GARAGE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_garage_bay_garage ON garage_bay(garage_id)
";

/// Index for loading the assignments of a page of work orders.
pub const CREATE_WORK_ASSIGNMENT_ORDER_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_work_assignment_order ON work_assignment(work_order_id)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// Data tables, in dependency order.
pub const DATA_TABLES: &[&str] = &[
    "team",
    "person",
    "garage",
    "garage_bay",
    "car",
    "part",
    "car_part",
    "session",
    "car_session",
    "telemetry_session",
    "work_order",
    "work_assignment",
];

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_TEAM_TABLE,
    CREATE_PERSON_TABLE,
    CREATE_GARAGE_TABLE,
    CREATE_GARAGE_BAY_TABLE,
    CREATE_CAR_TABLE,
    CREATE_PART_TABLE,
    CREATE_CAR_PART_TABLE,
    CREATE_SESSION_TABLE,
    CREATE_CAR_SESSION_TABLE,
    CREATE_TELEMETRY_SESSION_TABLE,
    CREATE_WORK_ORDER_TABLE,
    CREATE_WORK_ASSIGNMENT_TABLE,
    CREATE_CAR_PART_PART_INDEX,
    CREATE_CAR_PART_CAR_INDEX,
    CREATE_GARAGE_BAY_GARAGE_INDEX,
    CREATE_WORK_ASSIGNMENT_ORDER_INDEX,
    CREATE_METADATA_TABLE,
];
