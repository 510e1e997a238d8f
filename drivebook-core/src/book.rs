//! The lesson book: owns the lesson list and keeps storage in step with it.

use chrono::NaiveDateTime;

use crate::conflict::{first_conflict, overlapping_pairs};
use crate::constants::{LESSONS_KEY, TIME_FORMAT};
use crate::error::{DriveBookError, DriveBookResult};
use crate::lesson::{Lesson, LessonDraft};
use crate::ports::{ConfirmPrompt, KeyValueStore};

/// All lessons, loaded wholesale from a [`KeyValueStore`] and written back
/// wholesale after every mutation.
///
/// A mutation is applied to a copy first; the in-memory list only changes
/// once the copy has been persisted.
pub struct LessonBook<S> {
    store: S,
    lessons: Vec<Lesson>,
}

impl<S: KeyValueStore> LessonBook<S> {
    /// Load lessons from `store`. Missing or malformed data loads as an empty book.
    pub fn load(store: S) -> DriveBookResult<Self> {
        let lessons = match store.get(LESSONS_KEY)? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<Lesson>>(&raw) {
                Ok(lessons) => lessons,
                Err(e) => {
                    tracing::warn!(error = %e, "stored lessons are malformed, starting empty");
                    Vec::new()
                }
            },
        };

        tracing::debug!(count = lessons.len(), "loaded lessons");
        let book = LessonBook { store, lessons };

        for (a, b) in book.overlaps() {
            tracing::warn!(first = %a.id, second = %b.id, "stored lessons overlap");
        }

        Ok(book)
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn get(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    /// Resolve a full id or a unique id prefix.
    pub fn resolve(&self, id_or_prefix: &str) -> DriveBookResult<&Lesson> {
        if let Some(lesson) = self.get(id_or_prefix) {
            return Ok(lesson);
        }

        let mut matches = self
            .lessons
            .iter()
            .filter(|l| !id_or_prefix.is_empty() && l.id.starts_with(id_or_prefix));

        match (matches.next(), matches.next()) {
            (Some(lesson), None) => Ok(lesson),
            (Some(_), Some(_)) => Err(DriveBookError::AmbiguousId(id_or_prefix.to_string())),
            _ => Err(DriveBookError::LessonNotFound(id_or_prefix.to_string())),
        }
    }

    /// Pairs of stored lessons that overlap each other.
    pub fn overlaps(&self) -> Vec<(&Lesson, &Lesson)> {
        overlapping_pairs(&self.lessons)
    }

    /// Validate `draft` against `now` and the booked lessons, then store it
    /// under a new id.
    pub fn add(&mut self, draft: &LessonDraft, now: NaiveDateTime) -> DriveBookResult<Lesson> {
        let fields = draft.validate(now)?;
        if let Some(other) = first_conflict(&fields.slot(), None, &self.lessons) {
            tracing::debug!(other = %other.id, "add blocked by overlap");
            return Err(DriveBookError::Conflict);
        }

        let lesson = Lesson::new(fields);
        let mut updated = self.lessons.clone();
        updated.push(lesson.clone());
        self.commit(updated)?;

        tracing::info!(id = %lesson.id, "added lesson");
        Ok(lesson)
    }

    /// Replace the fields of lesson `id`, keeping its id.
    pub fn update(&mut self, id: &str, draft: &LessonDraft, now: NaiveDateTime) -> DriveBookResult<Lesson> {
        let index = self
            .lessons
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| DriveBookError::LessonNotFound(id.to_string()))?;

        let fields = draft.validate(now)?;
        if let Some(other) = first_conflict(&fields.slot(), Some(id), &self.lessons) {
            tracing::debug!(other = %other.id, "update blocked by overlap");
            return Err(DriveBookError::Conflict);
        }

        let lesson = Lesson::with_id(id.to_string(), fields);
        let mut updated = self.lessons.clone();
        updated[index] = lesson.clone();
        self.commit(updated)?;

        tracing::info!(id = %lesson.id, "updated lesson");
        Ok(lesson)
    }

    /// Ask `prompt` for confirmation and delete lesson `id`.
    /// Returns None when the user declines.
    pub fn remove(&mut self, id: &str, prompt: &dyn ConfirmPrompt) -> DriveBookResult<Option<Lesson>> {
        let lesson = self
            .get(id)
            .cloned()
            .ok_or_else(|| DriveBookError::LessonNotFound(id.to_string()))?;

        if !prompt.confirm(&delete_message(&lesson))? {
            return Ok(None);
        }

        let updated: Vec<Lesson> = self.lessons.iter().filter(|l| l.id != id).cloned().collect();
        self.commit(updated)?;

        tracing::info!(id = %lesson.id, "removed lesson");
        Ok(Some(lesson))
    }

    fn commit(&mut self, lessons: Vec<Lesson>) -> DriveBookResult<()> {
        let raw = serde_json::to_string(&lessons)
            .map_err(|e| DriveBookError::Serialization(e.to_string()))?;
        self.store.set(LESSONS_KEY, &raw)?;
        self.lessons = lessons;
        Ok(())
    }
}

/// Question asked before deleting `lesson`.
pub fn delete_message(lesson: &Lesson) -> String {
    format!(
        "Delete the lesson for {} ({}, {} - {})?",
        lesson.student,
        lesson.date.format("%d.%m.%Y"),
        lesson.start_time.format(TIME_FORMAT),
        lesson.end_time.format(TIME_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::lesson::parse_date;
    use crate::ports::{FixedAnswer, MemoryStore};

    fn now() -> NaiveDateTime {
        parse_date("2025-07-10").unwrap().and_hms_opt(7, 30, 0).unwrap()
    }

    fn draft(date: &str, start: &str, end: &str, student: &str) -> LessonDraft {
        LessonDraft {
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            student: student.to_string(),
        }
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> DriveBookResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> DriveBookResult<()> {
            Err(DriveBookError::Storage("disk full".into()))
        }
    }

    struct RecordingPrompt {
        answer: bool,
        asked: RefCell<Vec<String>>,
    }

    impl ConfirmPrompt for RecordingPrompt {
        fn confirm(&self, message: &str) -> DriveBookResult<bool> {
            self.asked.borrow_mut().push(message.to_string());
            Ok(self.answer)
        }
    }

    #[test]
    fn test_missing_and_malformed_state_load_empty() {
        let book = LessonBook::load(MemoryStore::new()).unwrap();
        assert!(book.lessons().is_empty());

        let book = LessonBook::load(MemoryStore::with_value(LESSONS_KEY, "{not json")).unwrap();
        assert!(book.lessons().is_empty());
    }

    #[test]
    fn test_add_persists_whole_list() {
        let store = MemoryStore::new();
        let mut book = LessonBook::load(&store).unwrap();

        let first = book.add(&draft("2025-07-10", "08:00", "09:00", "Ana"), now()).unwrap();
        book.add(&draft("2025-07-10", "09:00", "10:00", "Marko"), now()).unwrap();

        let reloaded = LessonBook::load(&store).unwrap();
        assert_eq!(reloaded.lessons().len(), 2);
        assert_eq!(reloaded.lessons()[0], first);
    }

    #[test]
    fn test_conflicting_add_leaves_state_untouched() {
        let store = MemoryStore::new();
        let mut book = LessonBook::load(&store).unwrap();
        book.add(&draft("2025-07-10", "08:00", "09:00", "Ana"), now()).unwrap();
        let before = store.get(LESSONS_KEY).unwrap();

        let err = book.add(&draft("2025-07-10", "08:30", "09:30", "Marko"), now()).unwrap_err();
        assert!(matches!(err, DriveBookError::Conflict));
        assert!(err.is_validation());
        assert_eq!(book.lessons().len(), 1);
        assert_eq!(store.get(LESSONS_KEY).unwrap(), before);
    }

    #[test]
    fn test_failed_write_keeps_memory_unchanged() {
        let mut book = LessonBook::load(FailingStore).unwrap();
        let err = book.add(&draft("2025-07-10", "08:00", "09:00", "Ana"), now()).unwrap_err();
        assert!(matches!(err, DriveBookError::Storage(_)));
        assert!(!err.is_validation());
        assert!(book.lessons().is_empty());
    }

    #[test]
    fn test_update_keeps_id_and_allows_own_slot() {
        let mut book = LessonBook::load(MemoryStore::new()).unwrap();
        let lesson = book.add(&draft("2025-07-10", "08:00", "09:00", "Ana"), now()).unwrap();

        let same_slot = book
            .update(&lesson.id, &draft("2025-07-10", "08:00", "09:00", "Ana Anić"), now())
            .unwrap();
        assert_eq!(same_slot.id, lesson.id);
        assert_eq!(book.lessons().len(), 1);
        assert_eq!(book.lessons()[0].student, "Ana Anić");
    }

    #[test]
    fn test_update_still_checks_other_lessons() {
        let mut book = LessonBook::load(MemoryStore::new()).unwrap();
        let ana = book.add(&draft("2025-07-10", "08:00", "09:00", "Ana"), now()).unwrap();
        book.add(&draft("2025-07-10", "10:00", "11:00", "Marko"), now()).unwrap();

        let err = book
            .update(&ana.id, &draft("2025-07-10", "09:30", "10:30", "Ana"), now())
            .unwrap_err();
        assert!(matches!(err, DriveBookError::Conflict));

        let err = book
            .update("missing", &draft("2025-07-10", "12:00", "13:00", "Ana"), now())
            .unwrap_err();
        assert!(matches!(err, DriveBookError::LessonNotFound(_)));
    }

    #[test]
    fn test_remove_asks_first() {
        let store = MemoryStore::new();
        let mut book = LessonBook::load(&store).unwrap();
        let lesson = book.add(&draft("2025-07-10", "08:00", "09:00", "Ana"), now()).unwrap();

        let prompt = RecordingPrompt { answer: false, asked: RefCell::new(Vec::new()) };
        assert_eq!(book.remove(&lesson.id, &prompt).unwrap(), None);
        assert_eq!(book.lessons().len(), 1);
        assert_eq!(
            prompt.asked.borrow().as_slice(),
            ["Delete the lesson for Ana (10.07.2025, 08:00 - 09:00)?"]
        );

        let removed = book.remove(&lesson.id, &FixedAnswer(true)).unwrap();
        assert_eq!(removed, Some(lesson));
        assert!(LessonBook::load(&store).unwrap().lessons().is_empty());
    }

    #[test]
    fn test_resolve_by_prefix() {
        let stored = r#"[
            {"id":"abc-1","date":"2025-07-10","startTime":"08:00","endTime":"09:00","student":"Ana"},
            {"id":"abd-2","date":"2025-07-10","startTime":"09:00","endTime":"10:00","student":"Marko"}
        ]"#;
        let book = LessonBook::load(MemoryStore::with_value(LESSONS_KEY, stored)).unwrap();

        assert_eq!(book.resolve("abc").unwrap().student, "Ana");
        assert_eq!(book.resolve("abd-2").unwrap().student, "Marko");
        assert!(matches!(book.resolve("ab"), Err(DriveBookError::AmbiguousId(_))));
        assert!(matches!(book.resolve("zzz"), Err(DriveBookError::LessonNotFound(_))));
    }

    #[test]
    fn test_overlapping_store_loads_and_blocks_next_add() {
        let stored = r#"[
            {"id":"a","date":"2025-07-10","startTime":"08:00","endTime":"09:00","student":"Ana"},
            {"id":"b","date":"2025-07-10","startTime":"08:30","endTime":"09:30","student":"Marko"}
        ]"#;
        let mut book = LessonBook::load(MemoryStore::with_value(LESSONS_KEY, stored)).unwrap();
        assert_eq!(book.overlaps().len(), 1);

        let err = book.add(&draft("2025-07-10", "09:00", "09:45", "Iva"), now()).unwrap_err();
        assert!(matches!(err, DriveBookError::Conflict));
    }
}
