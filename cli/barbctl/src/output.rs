//! Output formatting for CLI commands.

use barblab_forms::{Feedback, Tone};
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

impl OutputFormat {
    /// Parses the `--format` flag; anything but `json` is a table.
    pub fn from_flag(flag: &str) -> Self {
        match flag {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

/// Print data in the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No items found.".dimmed());
            } else {
                let table = Table::new(data).to_string();
                println!("{}", table);
            }
        }
        OutputFormat::Json => {
            println!("{}", format_json(data, "[]"));
        }
    }
}

/// Print a single item as JSON.
pub fn print_single<T: Serialize + ?Sized>(data: &T) {
    println!("{}", format_json(data, "{}"));
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue().bold(), message);
}

/// Print field feedback, colored by tone.
pub fn print_feedback(label: &str, feedback: &Feedback) {
    let message = match feedback.tone {
        Tone::Positive => feedback.message.green(),
        Tone::Negative => feedback.message.red(),
        Tone::Neutral => feedback.message.yellow(),
    };
    println!("{} {}", format!("{}:", label).bold(), message);
}

/// Keeps the rows whose displayed cells contain `needle`, ignoring case.
pub fn filter_rows<T: Tabled>(rows: Vec<T>, needle: Option<&str>) -> Vec<T> {
    let Some(needle) = needle.map(str::trim).filter(|n| !n.is_empty()) else {
        return rows;
    };
    let needle = needle.to_lowercase();

    rows.into_iter()
        .filter(|row| {
            row.fields()
                .iter()
                .any(|cell| cell.to_lowercase().contains(&needle))
        })
        .collect()
}

fn format_json<T: Serialize + ?Sized>(data: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct Row {
        name: String,
        city: String,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "Maria".into(),
                city: "São Paulo".into(),
            },
            Row {
                name: "João".into(),
                city: "Recife".into(),
            },
        ]
    }

    #[test]
    fn test_filter_rows_matches_any_column() {
        let found = filter_rows(rows(), Some("recife"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "João");

        let found = filter_rows(rows(), Some("MARIA"));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_filter_rows_blank_needle_keeps_all() {
        assert_eq!(filter_rows(rows(), None).len(), 2);
        assert_eq!(filter_rows(rows(), Some("  ")).len(), 2);
        assert!(filter_rows(rows(), Some("curitiba")).is_empty());
    }

    #[test]
    fn test_output_format_flag() {
        assert_eq!(OutputFormat::from_flag("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flag("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::from_flag("yaml"), OutputFormat::Table);
    }
}
