//! Summaries, tables and status lines printed by the commands

use super::OutputMode;
use crate::pixi::PythonEnvironment;
use console::style;

/// Outcome of a one-line status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Info,
    Warn,
    Fail,
}

impl Status {
    fn tag(self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Info => "[INFO]",
            Self::Warn => "[WARN]",
            Self::Fail => "[FAIL]",
        }
    }
}

/// Print a status line. Plain failures go to stderr.
pub fn status(mode: OutputMode, status: Status, message: &str) {
    if mode.is_fancy() {
        let _ = match status {
            Status::Ok => cliclack::log::success(message),
            Status::Info => cliclack::log::info(message),
            Status::Warn => cliclack::log::warning(message),
            Status::Fail => cliclack::log::error(message),
        };
        return;
    }

    let tag = match status {
        Status::Ok => style(status.tag()).green(),
        Status::Info => style(status.tag()).cyan(),
        Status::Warn => style(status.tag()).yellow(),
        Status::Fail => style(status.tag()).red(),
    };
    if status == Status::Fail {
        eprintln!("{} {}", tag, message);
    } else {
        println!("{} {}", tag, message);
    }
}

#[derive(Debug)]
enum Line {
    Field {
        key: String,
        value: String,
        flag: Option<bool>,
    },
    Heading(String),
}

/// A titled block of aligned `key  value` lines
#[derive(Debug)]
pub struct Report {
    title: String,
    lines: Vec<Line>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl ToString) -> Self {
        self.lines.push(Line::Field {
            key: key.to_string(),
            value: value.to_string(),
            flag: None,
        });
        self
    }

    /// A `yes`/`no` line, highlighted by its value in a terminal
    pub fn flag(mut self, key: &str, set: bool) -> Self {
        self.lines.push(Line::Field {
            key: key.to_string(),
            value: if set { "yes" } else { "no" }.to_string(),
            flag: Some(set),
        });
        self
    }

    pub fn heading(mut self, text: &str) -> Self {
        self.lines.push(Line::Heading(text.to_string()));
        self
    }

    fn key_width(&self) -> usize {
        self.lines
            .iter()
            .filter_map(|line| match line {
                Line::Field { key, .. } => Some(key.chars().count()),
                Line::Heading(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Undecorated text of the report
    pub fn render(&self) -> String {
        let width = self.key_width();
        let mut out = format!("{}\n", self.title);
        for line in &self.lines {
            match line {
                Line::Field { key, value, .. } => {
                    out.push_str(&format!("  {:<width$}  {}\n", key, value));
                }
                Line::Heading(text) => out.push_str(&format!("\n{}\n", text)),
            }
        }
        out
    }

    pub fn print(&self, mode: OutputMode) {
        if !mode.is_fancy() {
            print!("{}", self.render());
            return;
        }

        cliclack::intro(style(&self.title).cyan().bold()).ok();
        let width = self.key_width();
        for line in &self.lines {
            match line {
                Line::Field { key, value, flag } => {
                    let value = match flag {
                        Some(true) => style(value).green(),
                        Some(false) => style(value).yellow(),
                        None => style(value),
                    };
                    println!("  {}  {}", style(format!("{:<width$}", key)).dim(), value);
                }
                Line::Heading(text) => {
                    println!();
                    cliclack::log::info(style(text).bold()).ok();
                }
            }
        }
    }
}

const TABLE_HEADER: [&str; 3] = ["NAME", "PREFIX", "INTERPRETER"];

/// One row per environment under a `NAME  PREFIX  INTERPRETER` header
pub fn environment_table(environments: &[PythonEnvironment]) -> String {
    let rows: Vec<[String; 3]> = environments
        .iter()
        .map(|env| {
            [
                env.name().unwrap_or_else(|| "unknown".to_string()),
                env.prefix.display().to_string(),
                env.executable.display().to_string(),
            ]
        })
        .collect();

    let width = |column: usize| {
        rows.iter()
            .map(|row| row[column].chars().count())
            .chain([TABLE_HEADER[column].len()])
            .max()
            .unwrap_or(0)
    };
    let (name_width, prefix_width) = (width(0), width(1));

    let mut out = format!(
        "{:<name_width$}  {:<prefix_width$}  {}\n",
        TABLE_HEADER[0], TABLE_HEADER[1], TABLE_HEADER[2]
    );
    for [name, prefix, executable] in &rows {
        out.push_str(&format!(
            "{:<name_width$}  {:<prefix_width$}  {}\n",
            name, prefix, executable
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn environment(prefix: &str) -> PythonEnvironment {
        let prefix = PathBuf::from(prefix);
        PythonEnvironment::pixi(prefix.join("bin").join("python"), prefix)
    }

    #[test]
    fn report_aligns_keys() {
        let report = Report::new("Located pixi")
            .field("Executable", "/usr/bin/pixi")
            .field("Version", "0.40.1")
            .flag("Pixi environment", false);

        assert_eq!(
            report.render(),
            "Located pixi\n\
             \x20 Executable        /usr/bin/pixi\n\
             \x20 Version           0.40.1\n\
             \x20 Pixi environment  no\n"
        );
    }

    #[test]
    fn report_headings_break_sections() {
        let report = Report::new("Pixi info")
            .field("Version", "0.40.1")
            .heading("Environments (1)")
            .field("dev", "/work/demo/.pixi/envs/dev");

        let rendered = report.render();
        assert!(rendered.contains("\n\nEnvironments (1)\n"));
        assert!(rendered.ends_with("  dev      /work/demo/.pixi/envs/dev\n"));
    }

    #[test]
    fn table_columns_fit_longest_value() {
        let table = environment_table(&[
            environment("/p/.pixi/envs/default"),
            environment("/p/.pixi/envs/dev"),
        ]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "NAME     PREFIX                 INTERPRETER");
        assert_eq!(
            lines[2],
            "dev      /p/.pixi/envs/dev      /p/.pixi/envs/dev/bin/python"
        );
    }

    #[test]
    fn empty_table_is_header_only() {
        assert_eq!(environment_table(&[]), "NAME  PREFIX  INTERPRETER\n");
    }

    #[test]
    fn plain_status_lines() {
        status(OutputMode::Plain, Status::Ok, "Configuration initialized");
        status(OutputMode::Plain, Status::Fail, "Cannot set config key");
        assert_eq!(Status::Warn.tag(), "[WARN]");
    }
}
