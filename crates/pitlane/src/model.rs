//! Row types for the team operations store.
//!
//! Each struct mirrors one table, plus the denormalized fields the storage
//! layer joins in so callers do not need follow-up lookups. Foreign keys are
//! serialized under the relation name (`team`, `car`, ...) to match the
//! public wire format.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A racing team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Primary key.
    pub team_id: i64,
    /// Team name.
    pub name: String,
    /// Country of registration.
    pub country: Option<String>,
    /// Name of the team principal.
    pub principal_name: Option<String>,
}

/// A team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Primary key.
    pub person_id: i64,
    /// Owning team.
    #[serde(rename = "team")]
    pub team_id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Job within the team (mechanic, engineer, ...).
    pub role: String,
    /// Certification level, if recorded.
    pub certification_level: Option<String>,
    /// Name of the owning team.
    pub team_name: String,
}

impl Person {
    /// Given and family name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A garage allocated to a team for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Garage {
    /// Primary key.
    pub garage_id: i64,
    /// Owning team.
    #[serde(rename = "team")]
    pub team_id: i64,
    /// Name of the owning team.
    pub team_name: String,
    /// Circuit or facility.
    pub location: String,
    /// Season the garage is allocated for.
    pub season_year: i64,
    /// Bays in this garage, ordered by bay number.
    pub bays: Vec<GarageBay>,
}

/// A single working bay inside a garage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarageBay {
    /// Primary key.
    pub bay_id: i64,
    /// Owning garage.
    #[serde(rename = "garage")]
    pub garage_id: i64,
    /// Location of the owning garage.
    pub garage_location: String,
    /// Bay number within the garage.
    pub bay_number: i64,
    /// Whether the bay is in use.
    pub is_active: bool,
}

/// A race car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    /// Primary key.
    pub car_id: i64,
    /// Race number.
    pub car_number: i64,
    /// Unique chassis identifier.
    pub chassis_number: String,
    /// Operational status.
    pub status: String,
    /// Owning team.
    #[serde(rename = "team")]
    pub team_id: i64,
    /// Name of the owning team.
    pub team_name: String,
}

/// A physical, serialized part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Primary key.
    pub part_id: i64,
    /// Kind of part (gearbox, power unit, ...).
    pub part_type: String,
    /// Unique serial number.
    pub serial_number: String,
    /// Regulatory mileage limit before mandatory replacement.
    pub fia_lifecycle_limit: Option<i64>,
    /// Manufacturer, if recorded.
    pub manufacturer: Option<String>,
}

/// One installation of a part on a car.
///
/// The installation is active while `removed_at` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarPart {
    /// Primary key.
    pub car_part_id: i64,
    /// The car the part is fitted to.
    #[serde(rename = "car")]
    pub car_id: i64,
    /// The installed part.
    #[serde(rename = "part")]
    pub part_id: i64,
    /// Race number of the car.
    pub car_number: i64,
    /// Chassis number of the car.
    pub chassis_number: String,
    /// Type of the part.
    pub part_type: String,
    /// Serial number of the part.
    pub serial_number: String,
    /// Manufacturer of the part.
    pub manufacturer: Option<String>,
    /// Lifecycle limit of the part.
    pub fia_lifecycle_limit: Option<i64>,
    /// When the part was fitted.
    pub installed_at: DateTime<Utc>,
    /// When the part was removed, if it has been.
    pub removed_at: Option<DateTime<Utc>>,
    /// Mileage reading for this installation.
    pub mileage: Option<i64>,
}

impl CarPart {
    /// Whether the part is still fitted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.removed_at.is_none()
    }
}

/// A race weekend session (practice, qualifying, race, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Primary key.
    pub session_id: i64,
    /// Event name.
    pub race_name: String,
    /// Short session code such as `FP1` or `Q`.
    pub session_type: String,
    /// Day the session runs.
    pub session_date: NaiveDate,
}

/// A car's participation in a session, optionally tied to a garage bay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSession {
    /// Primary key.
    pub car_session_id: i64,
    /// The participating car.
    #[serde(rename = "car")]
    pub car_id: i64,
    /// The session.
    #[serde(rename = "session")]
    pub session_id: i64,
    /// The bay the car occupies.
    #[serde(rename = "bay")]
    pub bay_id: Option<i64>,
    /// Participation status.
    pub status: String,
    /// Race number of the car.
    pub car_number: i64,
    /// Event name of the session.
    pub race_name: String,
    /// Session code.
    pub session_type: String,
    /// Number of the occupied bay.
    pub bay_number: Option<i64>,
}

/// A recorded telemetry stream for a car session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetrySession {
    /// Primary key.
    pub telemetry_id: i64,
    /// The car session the data belongs to.
    #[serde(rename = "car_session")]
    pub car_session_id: i64,
    /// Where the raw telemetry is stored.
    pub data_location: String,
    /// Start of the recording.
    pub start_time: DateTime<Utc>,
    /// End of the recording, if finished.
    pub end_time: Option<DateTime<Utc>>,
}

/// A job raised against a car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Primary key.
    pub work_order_id: i64,
    /// The car the work is for.
    #[serde(rename = "car")]
    pub car_id: i64,
    /// Race number of the car.
    pub car_number: i64,
    /// Session the work was raised during, if any.
    #[serde(rename = "session")]
    pub session_id: Option<i64>,
    /// What needs doing.
    pub description: String,
    /// When the order was raised.
    pub created_at: DateTime<Utc>,
    /// When the work was signed off.
    pub completed_at: Option<DateTime<Utc>>,
    /// People assigned to the order.
    pub assignments: Vec<WorkAssignment>,
}

/// A person assigned to a work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkAssignment {
    /// Primary key.
    pub work_assignment_id: i64,
    /// The work order.
    #[serde(rename = "work_order")]
    pub work_order_id: i64,
    /// The assigned person.
    #[serde(rename = "person")]
    pub person_id: i64,
    /// Full name of the assigned person.
    pub person_name: String,
    /// Role on this job.
    pub role: String,
}
