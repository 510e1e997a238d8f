use anyhow::Result;
use drivebook_core::form::BookingForm;
use owo_colors::OwoColorize;

use crate::commands::add::fill_form;
use crate::commands::{Context, FieldArgs};

/// Edit a lesson in place. Without any field flags every field is prompted,
/// pre-filled with the current value.
pub fn run(ctx: &Context, id: &str, args: FieldArgs) -> Result<()> {
    let mut book = ctx.book()?;
    let lesson = book.resolve(id)?.clone();

    let mut form = BookingForm::new(ctx.today());
    form.select(&lesson);

    let interactive = args.is_empty();
    if interactive {
        println!("  Editing: {}", lesson.to_string().bold());
    }

    fill_form(ctx, &book, &mut form, args, interactive)?;
    let updated = form.submit(&mut book, ctx.now())?;

    if updated == lesson {
        println!("{}", "  No changes".dimmed());
    } else {
        println!("{}", format!("  Updated: {}", updated).green());
    }

    Ok(())
}
