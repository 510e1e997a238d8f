mod commands;
mod prompt;
mod render;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::list::View;
use crate::commands::{Context, FieldArgs};

#[derive(Parser)]
#[command(name = "drivebook")]
#[command(about = "Book driving lessons, check free time slots and look back at past lessons")]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Fields {
    /// Lesson date (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<String>,

    /// Start time (HH:MM)
    #[arg(short, long)]
    start: Option<String>,

    /// End time (HH:MM)
    #[arg(short, long)]
    end: Option<String>,

    /// Student name
    #[arg(long)]
    student: Option<String>,
}

impl From<Fields> for FieldArgs {
    fn from(f: Fields) -> Self {
        FieldArgs {
            date: f.date,
            start: f.start,
            end: f.end,
            student: f.student,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Book a new lesson (prompts for anything not given)
    Add {
        #[command(flatten)]
        fields: Fields,
    },
    /// Change an existing lesson, keeping its id
    Edit {
        /// Lesson id (or a unique prefix)
        id: String,

        #[command(flatten)]
        fields: Fields,
    },
    /// Delete a lesson
    Delete {
        /// Lesson id (or a unique prefix)
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Upcoming lessons, grouped by date
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Lessons from Monday to Saturday of this week
    Week {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Lessons from the past week
    Archive {
        /// Delete this archived lesson
        #[arg(long)]
        delete: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Free start times for a day, and end times for a given start
    Slots {
        /// Day to show (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Also list end times for this start (HH:MM)
        #[arg(short, long)]
        start: Option<String>,

        /// Ignore this lesson, as when editing it
        #[arg(long)]
        exclude: Option<String>,
    },
    /// Show config and data paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = Context::load()?;
    tracing::debug!(data_dir = %ctx.config.data_path().display(), "loaded config");

    match cli.command {
        Commands::Add { fields } => commands::add::run(&ctx, fields.into()),
        Commands::Edit { id, fields } => commands::edit::run(&ctx, &id, fields.into()),
        Commands::Delete { id, yes } => commands::delete::run(&ctx, &id, yes),
        Commands::List { json } => commands::list::run(&ctx, View::Upcoming, json),
        Commands::Week { json } => commands::list::run(&ctx, View::Week, json),
        Commands::Archive { delete, yes, json } => match delete {
            Some(id) => commands::list::delete_archived(&ctx, &id, yes),
            None => commands::list::run(&ctx, View::Archive, json),
        },
        Commands::Slots {
            date,
            start,
            exclude,
        } => commands::slots::run(&ctx, date, start, exclude),
        Commands::Config => commands::config::run(&ctx),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
