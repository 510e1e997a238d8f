pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod slots;

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use drivebook_core::LessonBook;
use drivebook_core::config::DriveBookConfig;
use drivebook_core::file_store::FileStore;

/// What every command needs: the resolved config and the local clock.
pub struct Context {
    pub config: DriveBookConfig,
}

impl Context {
    pub fn load() -> Result<Self> {
        let config = DriveBookConfig::load()?;
        Ok(Context { config })
    }

    /// Local wall-clock time, read on every call.
    pub fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    pub fn book(&self) -> Result<LessonBook<FileStore>> {
        Ok(LessonBook::load(self.config.store())?)
    }
}

/// Field values passed on the command line for add/edit.
#[derive(Debug, Default, Clone)]
pub struct FieldArgs {
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub student: Option<String>,
}

impl FieldArgs {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.start.is_none() && self.end.is_none() && self.student.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.date.is_some() && self.start.is_some() && self.end.is_some() && self.student.is_some()
    }
}
