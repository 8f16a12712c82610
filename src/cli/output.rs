use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

use super::OutputFormat;

/// Render rows in the specified format
pub fn render_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::Table => Table::new(data).to_string(),
        OutputFormat::Plain => data
            .iter()
            .map(|row| row.fields().join("|"))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(rendered)
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Tabled)]
    struct Row {
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Size")]
        size: u32,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "a".into(),
                size: 1,
            },
            Row {
                name: "b".into(),
                size: 22,
            },
        ]
    }

    #[test]
    fn test_plain() {
        assert_eq!(render_output(&rows(), OutputFormat::Plain).unwrap(), "a|1\nb|22");
    }

    #[test]
    fn test_json() {
        let out = render_output(&rows(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[1]["name"], "b");
        assert_eq!(value[1]["size"], 22);
    }

    #[test]
    fn test_table_has_header_and_border() {
        let out = render_output(&rows(), OutputFormat::Table).unwrap();
        let first = out.lines().next().unwrap();
        assert!(first.starts_with('+'));
        assert!(out.lines().nth(1).unwrap().contains("Name"));
    }
}
