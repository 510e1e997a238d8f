//! Error types for drivebook.

use thiserror::Error;

/// Errors that can occur in drivebook operations.
///
/// The first group are validation failures: the user can fix them by
/// changing the form input, and they never touch stored state.
#[derive(Error, Debug)]
pub enum DriveBookError {
    #[error("Please fill in the {0}")]
    MissingField(&'static str),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error("The lesson must end after it starts ({start} - {end})")]
    EndNotAfterStart { start: String, end: String },

    #[error("This date is in the past, use the archive")]
    PastDate,

    #[error("Cannot book a lesson in the past")]
    PastDateTime,

    #[error("Not possible, that time overlaps another lesson")]
    Conflict,

    #[error("Lesson not found: {0}")]
    LessonNotFound(String),

    #[error("Lesson id '{0}' is ambiguous")]
    AmbiguousId(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DriveBookError {
    /// True for failures the user can correct by changing their input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DriveBookError::MissingField(_)
                | DriveBookError::InvalidDate(_)
                | DriveBookError::InvalidTime(_)
                | DriveBookError::EndNotAfterStart { .. }
                | DriveBookError::PastDate
                | DriveBookError::PastDateTime
                | DriveBookError::Conflict
        )
    }
}

/// Result type alias for drivebook operations.
pub type DriveBookResult<T> = Result<T, DriveBookError>;
