/// Storage key holding the serialized lesson list.
pub const LESSONS_KEY: &str = "lessons";

/// First bookable hour of the day.
pub const DEFAULT_OPEN_HOUR: u32 = 8;

/// Last bookable hour of the day (every step inside this hour is offered).
pub const DEFAULT_CLOSE_HOUR: u32 = 20;

/// Granularity of the time choices, in minutes.
pub const DEFAULT_STEP_MINUTES: u32 = 5;

/// How many days back the archive reaches.
pub const DEFAULT_ARCHIVE_DAYS: i64 = 7;

/// Upper bound accepted for `archive_days` in the config.
pub const MAX_ARCHIVE_DAYS: i64 = 3650;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
