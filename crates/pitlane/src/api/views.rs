//! Response payloads that add derived fields to stored rows.

use serde::Serialize;

use crate::lifecycle::{self, Lifecycle, PartLifecycle, WearStatus};
use crate::model::{Car, CarPart, Part, Person};

/// A part with its lifecycle values.
#[derive(Debug, Clone, Serialize)]
pub struct PartView {
    #[serde(flatten)]
    part: Part,
    lifecycle_percentage: Lifecycle,
    needs_replacement: bool,
    current_mileage: Option<i64>,
    is_installed: bool,
    lifecycle_status: WearStatus,
}

impl PartView {
    /// Combine a part with the values derived for it.
    #[must_use]
    pub fn new(part: Part, derived: PartLifecycle) -> Self {
        Self {
            part,
            lifecycle_percentage: derived.lifecycle,
            needs_replacement: derived.needs_replacement(),
            current_mileage: derived.current_mileage,
            is_installed: derived.is_installed,
            lifecycle_status: derived.lifecycle.status(),
        }
    }
}

/// An installation record with the wear it recorded.
#[derive(Debug, Clone, Serialize)]
pub struct CarPartView {
    #[serde(flatten)]
    car_part: CarPart,
    lifecycle_percentage: Option<f64>,
    is_active: bool,
}

impl From<CarPart> for CarPartView {
    fn from(car_part: CarPart) -> Self {
        Self {
            lifecycle_percentage: lifecycle::installation_percentage(&car_part),
            is_active: car_part.is_active(),
            car_part,
        }
    }
}

/// An installation record with its car and part in full.
#[derive(Debug, Clone, Serialize)]
pub struct CarPartDetailView {
    #[serde(flatten)]
    car_part: CarPartView,
    car_details: Car,
    part_details: PartView,
}

impl CarPartDetailView {
    /// Nest the related car and part under the installation.
    #[must_use]
    pub fn new(car_part: CarPart, car: Car, part: PartView) -> Self {
        Self {
            car_part: car_part.into(),
            car_details: car,
            part_details: part,
        }
    }
}

/// A person with their display name.
#[derive(Debug, Clone, Serialize)]
pub struct PersonView {
    #[serde(flatten)]
    person: Person,
    full_name: String,
}

impl From<Person> for PersonView {
    fn from(person: Person) -> Self {
        Self {
            full_name: person.full_name(),
            person,
        }
    }
}
