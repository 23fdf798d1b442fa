use console::{style, StyledObject};
use serde::Serialize;
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Writes command results as styled text or as JSON documents.
///
/// In JSON mode only `result` writes to stdout, so a command prints exactly
/// one document there; messages go to stderr.
pub struct OutputWriter {
    format: OutputFormat,
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    status: &'static str,
    data: &'a T,
}

#[derive(Serialize)]
struct StatusLine<'a> {
    status: &'a str,
    message: String,
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        let format = if json { OutputFormat::Json } else { OutputFormat::Human };
        Self { format }
    }

    pub fn info(&self, message: impl Display) {
        self.marked("info", style("ℹ").blue().bold(), message, false);
    }

    pub fn warning(&self, message: impl Display) {
        self.marked("warning", style("⚠").yellow().bold(), message, true);
    }

    fn marked(&self, status: &str, marker: StyledObject<&str>, message: impl Display, to_stderr: bool) {
        match self.format {
            OutputFormat::Human if to_stderr => eprintln!("{} {}", marker, message),
            OutputFormat::Human => println!("{} {}", marker, message),
            OutputFormat::Json => {
                let line = StatusLine { status, message: message.to_string() };
                if let Ok(text) = serde_json::to_string(&line) {
                    eprintln!("{}", text);
                }
            }
        }
    }

    /// Rounded table of rows; JSON mode renders rows through `result` instead.
    pub fn table<T: Tabled>(&self, rows: Vec<T>) {
        if self.is_json() {
            return;
        }
        if rows.is_empty() {
            println!("{}", style("(no rows)").dim());
            return;
        }
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }

    pub fn result<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let text = match self.format {
            OutputFormat::Human => serde_json::to_string_pretty(&data)?,
            OutputFormat::Json => serde_json::to_string_pretty(&Envelope { status: "success", data: &data })?,
        };
        println!("{}", text);
        Ok(())
    }

    pub fn kv(&self, key: impl Display, value: impl Display) {
        if !self.is_json() {
            println!("{}: {}", style(key).bold(), value);
        }
    }

    pub fn section(&self, title: impl Display) {
        if !self.is_json() {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}
