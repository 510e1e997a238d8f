//! Overlap checks between a candidate slot and booked lessons.

use chrono::NaiveTime;

use crate::lesson::{Lesson, Slot};

/// Returns true if `candidate` overlaps any lesson in `existing` on the same day.
///
/// The lesson whose id equals `exclude_id` is ignored, so an edited lesson is
/// never compared against itself. Incomplete candidates never conflict.
pub fn conflicts(candidate: &Slot, exclude_id: Option<&str>, existing: &[Lesson]) -> bool {
    first_conflict(candidate, exclude_id, existing).is_some()
}

/// The first lesson in `existing` that `candidate` overlaps, if any.
pub fn first_conflict<'a>(
    candidate: &Slot,
    exclude_id: Option<&str>,
    existing: &'a [Lesson],
) -> Option<&'a Lesson> {
    let (Some(date), Some(start), Some(end)) = (candidate.date, candidate.start, candidate.end) else {
        return None;
    };

    existing
        .iter()
        .filter(|lesson| lesson.date == date)
        .filter(|lesson| exclude_id != Some(lesson.id.as_str()))
        .find(|lesson| overlaps(start, end, lesson))
}

/// Three-clause overlap test. Zero-length and inverted candidates are
/// judged by these clauses as written.
fn overlaps(start: NaiveTime, end: NaiveTime, lesson: &Lesson) -> bool {
    (start >= lesson.start_time && start < lesson.end_time)
        || (end > lesson.start_time && end <= lesson.end_time)
        || (start <= lesson.start_time && end >= lesson.end_time)
}

/// Pairs of stored lessons that already overlap each other.
///
/// The store never rejects these on load; callers surface them as a warning.
pub fn overlapping_pairs(lessons: &[Lesson]) -> Vec<(&Lesson, &Lesson)> {
    let mut pairs = Vec::new();
    for (i, a) in lessons.iter().enumerate() {
        for b in &lessons[i + 1..] {
            if a.date == b.date && overlaps(a.start_time, a.end_time, b) {
                pairs.push((a, b));
            }
        }
    }
    pairs
}
