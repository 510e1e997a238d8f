use anyhow::{Result, bail};
use chrono::NaiveTime;
use drivebook_core::file_store::FileStore;
use drivebook_core::form::BookingForm;
use drivebook_core::{DriveBookError, LessonBook};
use owo_colors::OwoColorize;

use crate::commands::{Context, FieldArgs};
use crate::prompt;
use crate::render::render_notice;

pub fn run(ctx: &Context, args: FieldArgs) -> Result<()> {
    let mut book = ctx.book()?;
    let mut form = BookingForm::new(ctx.today());
    let interactive = !args.is_complete();

    fill_form(ctx, &book, &mut form, args, interactive)?;
    let lesson = form.submit(&mut book, ctx.now())?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Booked: {}", lesson).green());
    println!("  {}", format!("id {}", lesson.id).dimmed());

    Ok(())
}

/// Apply command-line values to the form and prompt for the rest when
/// running interactively. Prompts only offer times that are still free.
pub fn fill_form(
    ctx: &Context,
    book: &LessonBook<FileStore>,
    form: &mut BookingForm,
    args: FieldArgs,
    interactive: bool,
) -> Result<()> {
    let lessons = book.lessons();
    let settings = &ctx.config.slots;

    // --- Date ---
    match args.date {
        Some(date) => form.set_date(&date),
        None if interactive => loop {
            let input = prompt::text("  Date (YYYY-MM-DD)", Some(form.draft().date.as_str()))?;
            form.set_date(&input);

            if form.draft().slot().date.is_none() {
                eprintln!("  {}", DriveBookError::InvalidDate(input).to_string().red());
            } else if let Some(DriveBookError::PastDate) = form.notice(lessons, ctx.today()) {
                eprintln!("  {}", DriveBookError::PastDate.to_string().red());
            } else {
                break;
            }
        },
        None => {}
    }

    // --- Start ---
    match args.start {
        Some(start) => form.set_start(&start),
        None if interactive => {
            let free: Vec<NaiveTime> = form
                .start_options(lessons, settings)
                .into_iter()
                .filter(|option| !option.taken)
                .map(|option| option.time)
                .collect();
            if free.is_empty() {
                bail!("No free start times on {}", form.draft().date);
            }

            let start = prompt::select_time("  Start", &free, form.draft().slot().start)?;
            form.set_start(&start.format("%H:%M").to_string());
        }
        None => {}
    }

    // --- End ---
    match args.end {
        Some(end) => form.set_end(&end),
        None if interactive => {
            let ends = form.end_options(lessons, settings);
            if ends.is_empty() {
                bail!("No free end time after {}", form.draft().start_time);
            }

            let end = prompt::select_time("  End", &ends, form.draft().slot().end)?;
            form.set_end(&end.format("%H:%M").to_string());
        }
        None => {}
    }

    // --- Student ---
    match args.student {
        Some(student) => form.set_student(&student),
        None if interactive => {
            let current = form.draft().student.clone();
            let default = (!current.is_empty()).then_some(current.as_str());
            let student = prompt::text("  Student", default)?;
            form.set_student(&student);
        }
        None => {}
    }

    if let Some(notice) = form.notice(lessons, ctx.today()) {
        eprintln!("{}", render_notice(&notice));
    }

    Ok(())
}
