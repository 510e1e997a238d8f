//! Time-of-day choices for the start and end of a lesson.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CLOSE_HOUR, DEFAULT_OPEN_HOUR, DEFAULT_STEP_MINUTES};
use crate::conflict::conflicts;
use crate::error::{DriveBookError, DriveBookResult};
use crate::lesson::{Lesson, Slot};

/// Operating window and granularity of the offered times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotSettings {
    pub open_hour: u32,
    /// Every step inside this hour is still offered (20 means up to 20:55).
    pub close_hour: u32,
    pub step_minutes: u32,
}

impl Default for SlotSettings {
    fn default() -> Self {
        SlotSettings {
            open_hour: DEFAULT_OPEN_HOUR,
            close_hour: DEFAULT_CLOSE_HOUR,
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }
}

impl SlotSettings {
    pub fn validate(&self) -> DriveBookResult<()> {
        if self.close_hour > 23 || self.open_hour > self.close_hour {
            return Err(DriveBookError::Config(format!(
                "Invalid operating hours {}-{}",
                self.open_hour, self.close_hour
            )));
        }
        if self.step_minutes == 0 || 60 % self.step_minutes != 0 {
            return Err(DriveBookError::Config(format!(
                "step_minutes must divide 60, got {}",
                self.step_minutes
            )));
        }
        Ok(())
    }

    /// All offered times of day, ascending.
    pub fn times(&self) -> Vec<NaiveTime> {
        let step = self.step_minutes.max(1) as usize;
        (self.open_hour..=self.close_hour.min(23))
            .flat_map(|h| (0..60).step_by(step).map(move |m| (h, m)))
            .filter_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0))
            .collect()
    }
}

/// A candidate start time and whether an existing lesson already covers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartOption {
    pub time: NaiveTime,
    pub taken: bool,
}

/// True if `time` falls inside a lesson on `date`, i.e. it cannot be a new start.
pub fn is_taken(time: NaiveTime, date: NaiveDate, existing: &[Lesson], exclude_id: Option<&str>) -> bool {
    existing
        .iter()
        .filter(|lesson| lesson.date == date)
        .filter(|lesson| exclude_id != Some(lesson.id.as_str()))
        .any(|lesson| lesson.start_time <= time && time < lesson.end_time)
}

/// Every offered start time on `date`, with occupied ones marked as taken.
pub fn start_options(
    date: NaiveDate,
    existing: &[Lesson],
    exclude_id: Option<&str>,
    settings: &SlotSettings,
) -> Vec<StartOption> {
    settings
        .times()
        .into_iter()
        .map(|time| StartOption {
            time,
            taken: is_taken(time, date, existing, exclude_id),
        })
        .collect()
}

/// Start times on `date` that are still free.
pub fn available_starts(
    date: NaiveDate,
    existing: &[Lesson],
    exclude_id: Option<&str>,
    settings: &SlotSettings,
) -> Vec<NaiveTime> {
    start_options(date, existing, exclude_id, settings)
        .into_iter()
        .filter(|option| !option.taken)
        .map(|option| option.time)
        .collect()
}

/// End times after `start` that would not overlap another lesson.
/// Without a chosen start there is nothing to offer.
pub fn end_options(
    date: NaiveDate,
    start: Option<NaiveTime>,
    existing: &[Lesson],
    exclude_id: Option<&str>,
    settings: &SlotSettings,
) -> Vec<NaiveTime> {
    let Some(start) = start else {
        return Vec::new();
    };

    settings
        .times()
        .into_iter()
        .filter(|&end| end > start && !conflicts(&Slot::new(date, start, end), exclude_id, existing))
        .collect()
}
