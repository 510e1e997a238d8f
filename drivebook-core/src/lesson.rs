//! Lesson records and the raw form input they are built from.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{DATE_FORMAT, TIME_FORMAT};
use crate::error::{DriveBookError, DriveBookResult};

/// A booked driving lesson.
///
/// Serialized with camelCase keys and zero-padded `HH:MM` times so the
/// stored blob keeps the `[{ id, date, startTime, endTime, student }]` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub student: String,
}

impl Lesson {
    /// Create a lesson with a freshly generated id.
    pub fn new(fields: LessonFields) -> Self {
        Lesson::with_id(Uuid::new_v4().to_string(), fields)
    }

    pub fn with_id(id: String, fields: LessonFields) -> Self {
        Lesson {
            id,
            date: fields.date,
            start_time: fields.start_time,
            end_time: fields.end_time,
            student: fields.student,
        }
    }

    pub fn slot(&self) -> Slot {
        Slot::new(self.date, self.start_time, self.end_time)
    }

    /// Short id used in listings (first 8 characters).
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} - {} {}",
            self.date.format(DATE_FORMAT),
            self.start_time.format(TIME_FORMAT),
            self.end_time.format(TIME_FORMAT),
            self.student
        )
    }
}

/// A candidate interval on a given day.
///
/// Any part may be missing while the user is still filling in the form;
/// an incomplete slot never conflicts with anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slot {
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

impl Slot {
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Slot {
            date: Some(date),
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.date.is_some() && self.start.is_some() && self.end.is_some()
    }
}

/// Validated lesson fields, ready to be stored under a new or existing id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonFields {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub student: String,
}

impl LessonFields {
    pub fn slot(&self) -> Slot {
        Slot::new(self.date, self.start_time, self.end_time)
    }
}

/// Raw form input. Empty strings mean "not filled in yet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonDraft {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub student: String,
}

impl LessonDraft {
    pub fn from_lesson(lesson: &Lesson) -> Self {
        LessonDraft {
            date: lesson.date.format(DATE_FORMAT).to_string(),
            start_time: lesson.start_time.format(TIME_FORMAT).to_string(),
            end_time: lesson.end_time.format(TIME_FORMAT).to_string(),
            student: lesson.student.clone(),
        }
    }

    /// Best-effort view of the draft as a slot; unparsable parts are left out.
    pub fn slot(&self) -> Slot {
        Slot {
            date: parse_date(&self.date).ok(),
            start: parse_time(&self.start_time).ok(),
            end: parse_time(&self.end_time).ok(),
        }
    }

    /// Check everything that does not need the other lessons:
    /// required fields, formats, ordering and that the lesson is not in the past.
    pub fn validate(&self, now: NaiveDateTime) -> DriveBookResult<LessonFields> {
        let required = [
            ("date", &self.date),
            ("start time", &self.start_time),
            ("end time", &self.end_time),
            ("student", &self.student),
        ];
        if let Some((name, _)) = required.into_iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(DriveBookError::MissingField(name));
        }

        let date = parse_date(&self.date)?;
        let start_time = parse_time(&self.start_time)?;
        let end_time = parse_time(&self.end_time)?;

        if end_time <= start_time {
            return Err(DriveBookError::EndNotAfterStart {
                start: self.start_time.trim().to_string(),
                end: self.end_time.trim().to_string(),
            });
        }

        if date.and_time(start_time) < now {
            return Err(DriveBookError::PastDateTime);
        }

        Ok(LessonFields {
            date,
            start_time,
            end_time,
            student: self.student.trim().to_string(),
        })
    }
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> DriveBookResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| DriveBookError::InvalidDate(s.trim().to_string()))
}

/// Parse HH:MM (minute granularity)
pub fn parse_time(s: &str) -> DriveBookResult<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), TIME_FORMAT)
        .map_err(|_| DriveBookError::InvalidTime(s.trim().to_string()))
}

/// Serde adapter for zero-padded `HH:MM` times.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::constants::TIME_FORMAT;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}
