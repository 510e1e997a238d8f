use anyhow::{Result, bail};
use drivebook_core::views::{self, group_by_date};
use owo_colors::OwoColorize;

use crate::commands::{Context, delete};
use crate::render::{pluralize, render_groups, week_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Upcoming,
    Week,
    Archive,
}

pub fn run(ctx: &Context, view: View, json: bool) -> Result<()> {
    let book = ctx.book()?;
    let today = ctx.today();

    let lessons = match view {
        View::Upcoming => views::upcoming(book.lessons(), today),
        View::Week => views::this_week(book.lessons(), today),
        View::Archive => views::archive(book.lessons(), today, ctx.config.archive_days),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&lessons)?);
        return Ok(());
    }

    match view {
        View::Upcoming => println!("{}", "Upcoming lessons".bold()),
        View::Week => println!("{}", week_label(today).bold()),
        View::Archive => println!(
            "{}",
            format!("Archive, last {} days", ctx.config.archive_days).bold()
        ),
    }
    println!();

    if lessons.is_empty() {
        println!("{}", "  No lessons".dimmed());
    } else {
        let count = lessons.len();
        println!("{}", render_groups(&group_by_date(lessons), today));
        println!();
        println!("{}", format!("  {} {}", count, pluralize("lesson", count)).dimmed());
    }

    let overlaps = book.overlaps();
    if view == View::Upcoming && !overlaps.is_empty() {
        println!();
        for (a, b) in overlaps {
            println!("  {} {} / {}", "overlap:".yellow(), a, b);
        }
    }

    Ok(())
}

/// Delete a lesson shown in the archive; it is removed from the full set.
pub fn delete_archived(ctx: &Context, id: &str, force: bool) -> Result<()> {
    let mut book = ctx.book()?;
    let archived = views::archive(book.lessons(), ctx.today(), ctx.config.archive_days);

    let lesson = book.resolve(id)?.clone();
    if !archived.iter().any(|l| l.id == lesson.id) {
        bail!("Lesson {} is not in the archive", lesson.short_id());
    }

    delete::remove(&mut book, &lesson, force)
}
