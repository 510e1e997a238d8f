//! TUI rendering for drivebook types.
//!
//! Extension traits that add colored terminal output to drivebook-core
//! types using owo_colors.

use chrono::NaiveDate;
use drivebook_core::{DriveBookError, Lesson};
use drivebook_core::slots::StartOption;
use drivebook_core::views::{DayGroup, week_span};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Lesson {
    fn render(&self) -> String {
        let time = format!(
            "{} - {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        );
        let id = format!("[{}]", self.short_id());
        format!("  {} {} {}", time, self.student.bold(), id.dimmed())
    }
}

impl Render for StartOption {
    fn render(&self) -> String {
        let time = self.time.format("%H:%M").to_string();
        if self.taken {
            time.dimmed().strikethrough().to_string()
        } else {
            time.green().to_string()
        }
    }
}

/// Date heading relative to `today` (e.g. "Today", "Tomorrow", "Sat 12.07.2025")
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %d.%m.%Y").to_string(),
    }
}

/// Heading for the working week containing `today`
pub fn week_label(today: NaiveDate) -> String {
    let (monday, saturday) = week_span(today);
    format!(
        "This week, {} - {}",
        monday.format("%a %d.%m."),
        saturday.format("%a %d.%m.%Y")
    )
}

/// Lessons grouped under date headings, one blank line between days.
pub fn render_groups(groups: &[DayGroup], today: NaiveDate) -> String {
    let mut lines = Vec::new();

    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(date_label(group.date, today).bold().to_string());
        lines.extend(group.lessons.iter().map(Render::render));
    }

    lines.join("\n")
}

/// Times laid out in rows of `per_row`.
pub fn render_time_grid(cells: &[String], per_row: usize) -> String {
    cells
        .chunks(per_row.max(1))
        .map(|row| format!("  {}", row.join("  ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Warning line for a form notice (past date or overlap) shown before submit.
pub fn render_notice(notice: &DriveBookError) -> String {
    format!("  {} {}", "warning:".yellow().bold(), notice.to_string().yellow())
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_date_label_relative_days() {
        let today = d("2025-07-10");
        assert_eq!(date_label(today, today), "Today");
        assert_eq!(date_label(d("2025-07-11"), today), "Tomorrow");
        assert_eq!(date_label(d("2025-07-09"), today), "Yesterday");
        assert_eq!(date_label(d("2025-07-12"), today), "Sat 12.07.2025");
    }

    #[test]
    fn test_week_label_spans_monday_to_saturday() {
        assert_eq!(week_label(d("2025-07-10")), "This week, Mon 07.07. - Sat 12.07.2025");
    }

    #[test]
    fn test_time_grid_rows() {
        let cells: Vec<String> = ["08:00", "08:05", "08:10"].iter().map(|s| s.to_string()).collect();
        assert_eq!(render_time_grid(&cells, 2), "  08:00  08:05\n  08:10");
    }

    #[test]
    fn test_notice_line_carries_the_message() {
        let line = render_notice(&DriveBookError::Conflict);
        assert!(line.starts_with("  "));
        assert!(line.contains("warning:"));
        assert!(line.contains("Not possible, that time overlaps another lesson"));
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("lesson", 1), "lesson");
        assert_eq!(pluralize("lesson", 3), "lessons");
    }
}
