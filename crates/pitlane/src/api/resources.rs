//! Per-resource query parameter allow-lists.
//!
//! A list endpoint only honours the filters, search fields and ordering
//! fields named here. Field names refer to the storage tables' field maps.

/// How a filter parameter's value becomes a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FilterKind {
    /// Integer equality (foreign keys, years).
    Integer,
    /// Exact text equality.
    Text,
    /// Case-insensitive substring.
    Contains,
    /// Boolean column equality.
    Boolean,
    /// `true` selects rows where the field is null.
    NullWhenTrue,
    /// `true` selects rows where the field is set.
    SetWhenTrue,
}

/// One accepted filter parameter.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Filter {
    /// Query parameter name.
    pub param: &'static str,
    /// Storage field it applies to.
    pub field: &'static str,
    /// How the raw value becomes a predicate.
    pub kind: FilterKind,
}

const fn filter(param: &'static str, field: &'static str, kind: FilterKind) -> Filter {
    Filter { param, field, kind }
}

/// Parameters a list endpoint accepts.
#[derive(Debug)]
pub(crate) struct Resource {
    pub filters: &'static [Filter],
    pub search: &'static [&'static str],
    pub ordering: &'static [&'static str],
}

impl Resource {
    /// Look up an ordering field by its query spelling.
    pub fn ordering_field(&self, name: &str) -> Option<&'static str> {
        self.ordering.iter().copied().find(|field| *field == name)
    }
}

pub(crate) const TEAMS: Resource = Resource {
    filters: &[],
    search: &["name", "country"],
    ordering: &["name", "country"],
};

pub(crate) const CARS: Resource = Resource {
    filters: &[
        filter("team", "team", FilterKind::Integer),
        filter("status", "status", FilterKind::Text),
    ],
    search: &["chassis_number", "car_number"],
    ordering: &["car_number", "status"],
};

pub(crate) const PARTS: Resource = Resource {
    filters: &[
        filter("part_type", "part_type", FilterKind::Contains),
        filter("manufacturer", "manufacturer", FilterKind::Contains),
        filter("serial_number", "serial_number", FilterKind::Contains),
    ],
    search: &["serial_number", "part_type", "manufacturer"],
    ordering: &["part_type", "manufacturer", "fia_lifecycle_limit"],
};

pub(crate) const CAR_PARTS: Resource = Resource {
    filters: &[
        filter("car", "car", FilterKind::Integer),
        filter("part", "part", FilterKind::Integer),
        filter("is_active", "removed_at", FilterKind::NullWhenTrue),
        filter("part_type", "part_type", FilterKind::Contains),
    ],
    search: &["chassis_number", "serial_number", "part_type"],
    ordering: &["installed_at", "removed_at", "mileage"],
};

pub(crate) const PEOPLE: Resource = Resource {
    filters: &[
        filter("team", "team", FilterKind::Integer),
        filter("role", "role", FilterKind::Text),
        filter("certification_level", "certification_level", FilterKind::Text),
    ],
    search: &["first_name", "last_name", "role"],
    ordering: &["last_name", "first_name", "role"],
};

pub(crate) const GARAGES: Resource = Resource {
    filters: &[
        filter("team", "team", FilterKind::Integer),
        filter("season_year", "season_year", FilterKind::Integer),
    ],
    search: &["location"],
    ordering: &["season_year", "location"],
};

pub(crate) const GARAGE_BAYS: Resource = Resource {
    filters: &[
        filter("garage", "garage", FilterKind::Integer),
        filter("is_active", "is_active", FilterKind::Boolean),
    ],
    search: &[],
    ordering: &["bay_number"],
};

pub(crate) const SESSIONS: Resource = Resource {
    filters: &[filter("session_type", "session_type", FilterKind::Text)],
    search: &["race_name"],
    ordering: &["session_date", "race_name"],
};

pub(crate) const CAR_SESSIONS: Resource = Resource {
    filters: &[
        filter("car", "car", FilterKind::Integer),
        filter("session", "session", FilterKind::Integer),
        filter("status", "status", FilterKind::Text),
    ],
    search: &[],
    ordering: &["session", "car"],
};

pub(crate) const TELEMETRY_SESSIONS: Resource = Resource {
    filters: &[filter("car_session", "car_session", FilterKind::Integer)],
    search: &[],
    ordering: &["start_time", "end_time"],
};

pub(crate) const WORK_ORDERS: Resource = Resource {
    filters: &[
        filter("car", "car", FilterKind::Integer),
        filter("session", "session", FilterKind::Integer),
        filter("is_completed", "completed_at", FilterKind::SetWhenTrue),
    ],
    search: &["description"],
    ordering: &["created_at", "completed_at"],
};

pub(crate) const WORK_ASSIGNMENTS: Resource = Resource {
    filters: &[
        filter("work_order", "work_order", FilterKind::Integer),
        filter("person", "person", FilterKind::Integer),
        filter("role", "role", FilterKind::Text),
    ],
    search: &[],
    ordering: &["role"],
};
