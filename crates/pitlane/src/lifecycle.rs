//! Part lifecycle derivation.
//!
//! A part accumulates mileage while it is fitted to a car. Regulations cap
//! that mileage, so every part with a configured limit has a wear percentage
//! and is flagged for replacement once the percentage reaches
//! [`REPLACEMENT_THRESHOLD`].
//!
//! Absence of data is kept distinct from zero wear. A part without a limit has
//! no percentage at all ([`Lifecycle::NoLimit`]); a part with a limit that is
//! not fitted, or whose fitting has no mileage reading, is at zero
//! ([`Lifecycle::Unused`]). Only concrete readings can trigger a replacement.
//!
//! Everything here is pure: callers load parts and installations through
//! [`crate::storage::Storage`] and hand them in.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::model::{CarPart, Part};

/// Wear percentage at or above which a part must be replaced.
pub const REPLACEMENT_THRESHOLD: f64 = 80.0;

/// Wear percentage at which the display band turns to warning.
const WARNING_BAND: f64 = 70.0;

/// Wear percentage at which the display band turns to critical.
const CRITICAL_BAND: f64 = 90.0;

/// Wear state of a part against its regulatory limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lifecycle {
    /// The part has no usable lifecycle limit.
    NoLimit,
    /// The part has a limit but no recorded usage.
    Unused,
    /// Mileage as a percentage of the limit, rounded to one decimal.
    Worn(f64),
}

impl Lifecycle {
    /// The percentage, or `None` when the part has no limit.
    #[must_use]
    pub fn percentage(self) -> Option<f64> {
        match self {
            Self::NoLimit => None,
            Self::Unused => Some(0.0),
            Self::Worn(percentage) => Some(percentage),
        }
    }

    /// Whether wear has reached the replacement threshold (inclusive).
    #[must_use]
    pub fn needs_replacement(self) -> bool {
        self.percentage()
            .is_some_and(|percentage| percentage >= REPLACEMENT_THRESHOLD)
    }

    /// Display band for this wear state.
    #[must_use]
    pub fn status(self) -> WearStatus {
        match self.percentage() {
            Some(percentage) if percentage >= CRITICAL_BAND => WearStatus::Critical,
            Some(percentage) if percentage >= WARNING_BAND => WearStatus::Warning,
            Some(percentage) if percentage > 0.0 => WearStatus::Good,
            _ => WearStatus::Unknown,
        }
    }
}

impl Serialize for Lifecycle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.percentage().serialize(serializer)
    }
}

/// Coarse wear band shown next to the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WearStatus {
    /// No wear reading to judge.
    Unknown,
    /// Below the warning band.
    Good,
    /// Approaching the limit.
    Warning,
    /// At or near the limit.
    Critical,
}

/// Derived lifecycle values for one part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartLifecycle {
    /// Wear against the part's limit.
    pub lifecycle: Lifecycle,
    /// Mileage of the active installation, if one exists and has a reading.
    pub current_mileage: Option<i64>,
    /// Whether the part is currently fitted to a car.
    pub is_installed: bool,
}

impl PartLifecycle {
    /// Derive lifecycle values from a part and its active installation.
    #[must_use]
    pub fn assess(part: &Part, active: Option<&CarPart>) -> Self {
        Self {
            lifecycle: part_lifecycle(part, active),
            current_mileage: active.and_then(|installation| installation.mileage),
            is_installed: active.is_some(),
        }
    }

    /// Whether the part must be replaced.
    #[must_use]
    pub fn needs_replacement(&self) -> bool {
        self.lifecycle.needs_replacement()
    }
}

/// Pick the active installation among a part's installation records.
///
/// Well-formed data has at most one row without a removal timestamp. If
/// there are several, the first in iteration order wins.
pub fn active_installation<'a, I>(installations: I) -> Option<&'a CarPart>
where
    I: IntoIterator<Item = &'a CarPart>,
{
    installations
        .into_iter()
        .find(|installation| installation.is_active())
}

/// Wear of a part, judged by its active installation.
#[must_use]
pub fn part_lifecycle(part: &Part, active: Option<&CarPart>) -> Lifecycle {
    let Some(limit) = usable_limit(part.fia_lifecycle_limit) else {
        return Lifecycle::NoLimit;
    };

    match active.and_then(|installation| installation.mileage) {
        Some(mileage) => Lifecycle::Worn(wear_percentage(mileage, limit)),
        None => Lifecycle::Unused,
    }
}

/// Wear recorded by one installation, whether or not it is still active.
///
/// The divisor is the part's limit as joined onto the installation row.
/// Returns `None` when the part has no limit or the installation has no
/// mileage reading. A reading of zero counts as none here, unlike the
/// part-level value.
#[must_use]
pub fn installation_percentage(installation: &CarPart) -> Option<f64> {
    let limit = usable_limit(installation.fia_lifecycle_limit)?;
    let mileage = installation.mileage.filter(|mileage| *mileage > 0)?;
    Some(wear_percentage(mileage, limit))
}

/// Parts that need replacement, paired with their derived values.
///
/// `active` maps part ids to their active installation. Parts without a
/// usable limit are skipped before anything is derived for them.
pub fn lifecycle_warnings<I>(
    parts: I,
    active: &HashMap<i64, CarPart>,
) -> Vec<(Part, PartLifecycle)>
where
    I: IntoIterator<Item = Part>,
{
    parts
        .into_iter()
        .filter(|part| usable_limit(part.fia_lifecycle_limit).is_some())
        .filter_map(|part| {
            let derived = PartLifecycle::assess(&part, active.get(&part.part_id));
            derived.needs_replacement().then_some((part, derived))
        })
        .collect()
}

/// A limit of zero or below cannot be divided by and counts as unset.
fn usable_limit(limit: Option<i64>) -> Option<i64> {
    limit.filter(|limit| *limit > 0)
}

#[allow(clippy::cast_precision_loss)]
fn wear_percentage(mileage: i64, limit: i64) -> f64 {
    let percentage = mileage as f64 / limit as f64 * 100.0;
    (percentage * 10.0).round() / 10.0
}
