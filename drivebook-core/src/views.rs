//! Date-based views over the full lesson set.
//!
//! Each view is a plain filter parameterized by "today"; views may overlap.

use chrono::{Datelike, Duration, NaiveDate};

use crate::lesson::Lesson;

/// Lessons on or after `today`.
pub fn upcoming(lessons: &[Lesson], today: NaiveDate) -> Vec<Lesson> {
    filter_by(lessons, |date| date >= today)
}

/// Monday and Saturday of the working week containing `today`.
///
/// Weeks start on Monday. On a Sunday this is the week that just ended.
pub fn week_span(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    (monday, monday + Duration::days(5))
}

/// Lessons from Monday through Saturday of the current week (Sundays excluded).
pub fn this_week(lessons: &[Lesson], today: NaiveDate) -> Vec<Lesson> {
    let (monday, saturday) = week_span(today);
    filter_by(lessons, |date| date >= monday && date <= saturday)
}

/// Lessons in the trailing window `[today - days, today)`.
pub fn archive(lessons: &[Lesson], today: NaiveDate, days: i64) -> Vec<Lesson> {
    let since = Duration::try_days(days)
        .and_then(|span| today.checked_sub_signed(span))
        .unwrap_or(NaiveDate::MIN);
    filter_by(lessons, |date| date >= since && date < today)
}

fn filter_by(lessons: &[Lesson], keep: impl Fn(NaiveDate) -> bool) -> Vec<Lesson> {
    lessons.iter().filter(|l| keep(l.date)).cloned().collect()
}

/// Lessons of one day, sorted by start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub lessons: Vec<Lesson>,
}

/// Group lessons by date: days ascending, start times ascending within a day.
/// Lessons with equal date and start keep their stored order.
pub fn group_by_date(mut lessons: Vec<Lesson>) -> Vec<DayGroup> {
    lessons.sort_by(|a, b| a.date.cmp(&b.date).then(a.start_time.cmp(&b.start_time)));

    let mut groups: Vec<DayGroup> = Vec::new();
    for lesson in lessons {
        match groups.last_mut() {
            Some(group) if group.date == lesson.date => group.lessons.push(lesson),
            _ => groups.push(DayGroup {
                date: lesson.date,
                lessons: vec![lesson],
            }),
        }
    }
    groups
}
