use anyhow::Result;
use drivebook_core::config::DriveBookConfig;
use owo_colors::OwoColorize;

use crate::commands::Context;

pub fn run(ctx: &Context) -> Result<()> {
    let config_path = DriveBookConfig::config_path()?;
    let store = ctx.config.store();
    let slots = &ctx.config.slots;

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!("  Lessons:  {}", store.path_for(drivebook_core::constants::LESSONS_KEY).display());
    println!();
    println!("{}", "Booking".bold());
    println!(
        "  Hours:    {:02}:00 - {:02}:{:02}",
        slots.open_hour,
        slots.close_hour,
        60 - slots.step_minutes
    );
    println!("  Step:     {} min", slots.step_minutes);
    println!("  Archive:  {} days", ctx.config.archive_days);

    Ok(())
}
