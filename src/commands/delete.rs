use anyhow::Result;
use drivebook_core::file_store::FileStore;
use drivebook_core::ports::{ConfirmPrompt, FixedAnswer};
use drivebook_core::{Lesson, LessonBook};
use owo_colors::OwoColorize;

use crate::commands::Context;
use crate::prompt::TerminalConfirm;

pub fn run(ctx: &Context, id: &str, force: bool) -> Result<()> {
    let mut book = ctx.book()?;
    let lesson = book.resolve(id)?.clone();
    remove(&mut book, &lesson, force)
}

/// Delete `lesson` after confirmation (skipped with --yes).
pub fn remove(book: &mut LessonBook<FileStore>, lesson: &Lesson, force: bool) -> Result<()> {
    let prompt: &dyn ConfirmPrompt = if force { &FixedAnswer(true) } else { &TerminalConfirm };

    match book.remove(&lesson.id, prompt)? {
        Some(removed) => println!("{}", format!("  Deleted: {}", removed).red()),
        None => println!("{}", "  Kept".dimmed()),
    }

    Ok(())
}
