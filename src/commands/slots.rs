use anyhow::Result;
use drivebook_core::lesson::{parse_date, parse_time};
use drivebook_core::slots::{end_options, start_options};
use owo_colors::OwoColorize;

use crate::commands::Context;
use crate::render::{Render, date_label, render_time_grid};

/// Times per row in the grid (one hour at the default step).
const GRID_WIDTH: usize = 12;

/// Show start times for a day and, given a start, the possible end times.
pub fn run(
    ctx: &Context,
    date: Option<String>,
    start: Option<String>,
    exclude: Option<String>,
) -> Result<()> {
    let book = ctx.book()?;
    let settings = &ctx.config.slots;

    let date = match date {
        Some(d) => parse_date(&d)?,
        None => ctx.today(),
    };
    let exclude_id = match exclude {
        Some(id) => Some(book.resolve(&id)?.id.clone()),
        None => None,
    };
    let exclude_id = exclude_id.as_deref();

    println!("{}", date_label(date, ctx.today()).bold());
    println!("{}", "  Start times:".dimmed());

    let starts: Vec<String> = start_options(date, book.lessons(), exclude_id, settings)
        .iter()
        .map(Render::render)
        .collect();
    println!("{}", render_time_grid(&starts, GRID_WIDTH));

    if let Some(start) = start {
        let start = parse_time(&start)?;
        let ends: Vec<String> = end_options(date, Some(start), book.lessons(), exclude_id, settings)
            .iter()
            .map(|t| t.format("%H:%M").to_string())
            .collect();

        println!();
        println!("{}", format!("  End times after {}:", start.format("%H:%M")).dimmed());
        if ends.is_empty() {
            println!("{}", "  none".dimmed());
        } else {
            println!("{}", render_time_grid(&ends, GRID_WIDTH));
        }
    }

    Ok(())
}
