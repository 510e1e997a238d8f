//! Core types for drivebook, a driving-lesson scheduler.
//!
//! - `lesson`: the stored lesson record and raw form input
//! - `conflict`, `slots`, `views`: pure functions over a lesson list
//! - `book`: the lesson store, persisted through the `ports` traits
//! - `form`: the add/edit form state machine

pub mod book;
pub mod config;
pub mod conflict;
pub mod constants;
pub mod error;
pub mod file_store;
pub mod form;
pub mod lesson;
pub mod ports;
pub mod slots;
pub mod views;

pub use book::LessonBook;
pub use error::{DriveBookError, DriveBookResult};
pub use lesson::{Lesson, LessonDraft, Slot};
