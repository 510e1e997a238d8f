//! Add/Edit form state machine.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::book::LessonBook;
use crate::conflict::conflicts;
use crate::constants::DATE_FORMAT;
use crate::error::{DriveBookError, DriveBookResult};
use crate::lesson::{Lesson, LessonDraft};
use crate::ports::KeyValueStore;
use crate::slots::{self, SlotSettings, StartOption};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    /// Bound to the id of the lesson being edited.
    Edit { id: String },
}

/// Booking form. Only [`BookingForm::select`] enters edit mode; a successful
/// submit always returns the form to add mode with empty fields.
#[derive(Debug, Clone)]
pub struct BookingForm {
    mode: FormMode,
    draft: LessonDraft,
}

impl BookingForm {
    /// Fresh add form with the date pre-filled to `today`.
    pub fn new(today: NaiveDate) -> Self {
        BookingForm {
            mode: FormMode::Add,
            draft: LessonDraft {
                date: today.format(DATE_FORMAT).to_string(),
                ..Default::default()
            },
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &LessonDraft {
        &self.draft
    }

    fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Add => None,
            FormMode::Edit { id } => Some(id.as_str()),
        }
    }

    /// Switch to editing `lesson`, pre-filling every field from it.
    pub fn select(&mut self, lesson: &Lesson) {
        self.mode = FormMode::Edit { id: lesson.id.clone() };
        self.draft = LessonDraft::from_lesson(lesson);
    }

    /// Drop any edit in progress and start over in add mode.
    pub fn cancel(&mut self, today: NaiveDate) {
        *self = BookingForm::new(today);
    }

    pub fn set_date(&mut self, value: &str) {
        self.draft.date = value.to_string();
    }

    pub fn set_start(&mut self, value: &str) {
        self.draft.start_time = value.to_string();
    }

    pub fn set_end(&mut self, value: &str) {
        self.draft.end_time = value.to_string();
    }

    pub fn set_student(&mut self, value: &str) {
        self.draft.student = value.to_string();
    }

    /// Advisory message to show while the user is still editing: a date in
    /// the past, or a chosen interval that overlaps another lesson.
    pub fn notice(&self, existing: &[Lesson], today: NaiveDate) -> Option<DriveBookError> {
        let slot = self.draft.slot();

        if slot.date.is_some_and(|date| date < today) {
            return Some(DriveBookError::PastDate);
        }
        if conflicts(&slot, self.editing_id(), existing) {
            return Some(DriveBookError::Conflict);
        }
        None
    }

    /// Start choices for the form's date. Empty while no valid date is set.
    pub fn start_options(&self, existing: &[Lesson], settings: &SlotSettings) -> Vec<StartOption> {
        match self.draft.slot().date {
            Some(date) => slots::start_options(date, existing, self.editing_id(), settings),
            None => Vec::new(),
        }
    }

    /// End choices for the form's date and chosen start.
    pub fn end_options(&self, existing: &[Lesson], settings: &SlotSettings) -> Vec<NaiveTime> {
        let slot = self.draft.slot();
        match slot.date {
            Some(date) => slots::end_options(date, slot.start, existing, self.editing_id(), settings),
            None => Vec::new(),
        }
    }

    /// Validate and store the draft.
    ///
    /// On failure nothing changes: the form keeps its fields and mode and the
    /// book is untouched.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        book: &mut LessonBook<S>,
        now: NaiveDateTime,
    ) -> DriveBookResult<Lesson> {
        let lesson = match &self.mode {
            FormMode::Add => book.add(&self.draft, now)?,
            FormMode::Edit { id } => book.update(id, &self.draft, now)?,
        };

        self.mode = FormMode::Add;
        self.draft = LessonDraft::default();
        Ok(lesson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::{parse_date, parse_time};
    use crate::ports::MemoryStore;

    fn today() -> NaiveDate {
        parse_date("2025-07-10").unwrap()
    }

    fn now() -> NaiveDateTime {
        today().and_hms_opt(7, 0, 0).unwrap()
    }

    fn fill(form: &mut BookingForm, date: &str, start: &str, end: &str, student: &str) {
        form.set_date(date);
        form.set_start(start);
        form.set_end(end);
        form.set_student(student);
    }

    #[test]
    fn test_new_form_defaults_to_today() {
        let form = BookingForm::new(today());
        assert_eq!(form.mode(), &FormMode::Add);
        assert_eq!(form.draft().date, "2025-07-10");
        assert!(form.draft().student.is_empty());
    }

    #[test]
    fn test_add_submit_clears_fields() {
        let mut book = LessonBook::load(MemoryStore::new()).unwrap();
        let mut form = BookingForm::new(today());
        fill(&mut form, "2025-07-10", "08:00", "09:00", "Ana");

        let lesson = form.submit(&mut book, now()).unwrap();
        assert_eq!(book.lessons(), &[lesson]);
        assert_eq!(form.draft(), &LessonDraft::default());
        assert_eq!(form.mode(), &FormMode::Add);
    }

    #[test]
    fn test_failed_submit_keeps_input() {
        let mut book = LessonBook::load(MemoryStore::new()).unwrap();
        let mut form = BookingForm::new(today());
        fill(&mut form, "2025-07-10", "08:00", "09:00", "");

        let err = form.submit(&mut book, now()).unwrap_err();
        assert!(matches!(err, DriveBookError::MissingField("student")));
        assert_eq!(form.draft().start_time, "08:00");
        assert!(book.lessons().is_empty());
    }

    #[test]
    fn test_edit_round_trip_returns_to_add() {
        let mut book = LessonBook::load(MemoryStore::new()).unwrap();
        let mut form = BookingForm::new(today());
        fill(&mut form, "2025-07-10", "08:00", "09:00", "Ana");
        let lesson = form.submit(&mut book, now()).unwrap();

        form.select(&lesson);
        assert_eq!(form.mode(), &FormMode::Edit { id: lesson.id.clone() });
        assert_eq!(form.draft().end_time, "09:00");
        assert!(form.notice(book.lessons(), today()).is_none());

        form.set_end("09:30");
        let edited = form.submit(&mut book, now()).unwrap();
        assert_eq!(edited.id, lesson.id);
        assert_eq!(edited.end_time, parse_time("09:30").unwrap());
        assert_eq!(form.mode(), &FormMode::Add);
        assert_eq!(book.lessons().len(), 1);
    }

    #[test]
    fn test_cancel_edit_returns_to_fresh_add_form() {
        let mut book = LessonBook::load(MemoryStore::new()).unwrap();
        let mut form = BookingForm::new(today());
        fill(&mut form, "2025-07-11", "08:00", "09:00", "Ana");
        let lesson = form.submit(&mut book, now()).unwrap();

        form.select(&lesson);
        form.set_student("Marko");
        form.cancel(today());

        assert_eq!(form.mode(), &FormMode::Add);
        assert_eq!(form.draft(), BookingForm::new(today()).draft());
        assert_eq!(form.draft().date, "2025-07-10");
        assert_eq!(book.lessons()[0].student, "Ana");
    }

    #[test]
    fn test_notice_flags_past_date_and_overlap() {
        let mut book = LessonBook::load(MemoryStore::new()).unwrap();
        let mut form = BookingForm::new(today());
        fill(&mut form, "2025-07-10", "08:00", "09:00", "Ana");
        form.submit(&mut book, now()).unwrap();

        form.set_date("2025-07-09");
        assert!(matches!(form.notice(book.lessons(), today()), Some(DriveBookError::PastDate)));

        form.set_date("2025-07-10");
        form.set_start("08:30");
        assert!(form.notice(book.lessons(), today()).is_none());
        form.set_end("10:00");
        assert!(matches!(form.notice(book.lessons(), today()), Some(DriveBookError::Conflict)));
    }

    #[test]
    fn test_options_follow_form_date_and_edit_target() {
        let mut book = LessonBook::load(MemoryStore::new()).unwrap();
        let mut form = BookingForm::new(today());
        fill(&mut form, "2025-07-10", "08:00", "09:00", "Ana");
        let lesson = form.submit(&mut book, now()).unwrap();
        let settings = SlotSettings::default();

        let mut add_form = BookingForm::new(today());
        assert!(add_form.start_options(book.lessons(), &settings)[0].taken);
        assert!(add_form.end_options(book.lessons(), &settings).is_empty());
        add_form.set_start("09:00");
        assert_eq!(
            add_form.end_options(book.lessons(), &settings).first(),
            Some(&parse_time("09:05").unwrap())
        );

        form.select(&lesson);
        assert!(!form.start_options(book.lessons(), &settings)[0].taken);

        form.set_date("");
        assert!(form.start_options(book.lessons(), &settings).is_empty());
    }
}
