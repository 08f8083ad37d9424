//! Terminal output for command handlers.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Info,
}

impl Tone {
    fn mark(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
        }
    }
}

/// Writes user-facing lines to stdout according to `--quiet`, colour
/// settings and the resolved output format.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// `Auto` defers to `[output] format`, then to whether stdout is a TTY.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let resolved_format = match args.output_format {
            OutputFormat::Auto => match config.output.format.as_str() {
                "json" => OutputFormat::Json,
                "plain" => OutputFormat::Plain,
                _ if io::stdout().is_terminal() => OutputFormat::Human,
                _ => OutputFormat::Plain,
            },
            explicit => explicit,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    fn emit(&self, line: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(line)
    }

    fn marked(&self, tone: Tone, msg: &str) -> io::Result<()> {
        let mark = tone.mark();
        if self.no_color {
            return self.emit(&format!("{mark} {msg}"));
        }
        let line = match tone {
            Tone::Success => format!("{} {}", mark.green().bold(), msg.green()),
            Tone::Warning => format!("{} {}", mark.yellow().bold(), msg.yellow()),
            Tone::Info => format!("{} {}", mark.blue().bold(), msg.blue()),
        };
        self.emit(&line)
    }

    /// Unadorned line; suppressed in quiet mode like everything but JSON.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.emit(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked(Tone::Success, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked(Tone::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked(Tone::Info, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.no_color {
            self.emit(text)
        } else {
            self.emit(&text.cyan().bold().to_string())
        }
    }

    /// Emit a JSON document. Machine output ignores `--quiet`.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// A spinner for slow steps, or `None` when output is not for a human.
    pub fn spinner(&self, msg: &str) -> Option<ProgressBar> {
        if self.quiet || self.resolved_format != OutputFormat::Human {
            return None;
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(msg.to_owned());
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.is_quiet());
        assert!(out.print("hello").is_ok());
        assert!(out.success("done").is_ok());
    }

    #[test]
    fn tones_have_distinct_marks() {
        assert_ne!(Tone::Success.mark(), Tone::Warning.mark());
        assert_ne!(Tone::Warning.mark(), Tone::Info.mark());
    }

    #[test]
    fn no_color_flag_reported() {
        assert!(!make_manager(false, false, OutputFormat::Human).no_color);
        assert!(make_manager(false, true, OutputFormat::Human).no_color);
    }

    #[test]
    fn plain_format_disables_color() {
        assert!(make_manager(false, false, OutputFormat::Plain).no_color);
    }

    #[test]
    fn explicit_format_wins_over_config() {
        let out = make_manager(false, false, OutputFormat::Json);
        assert_eq!(out.resolved_format, OutputFormat::Json);
        assert!(out.is_json());
    }

    #[test]
    fn configured_format_applies_on_auto() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Auto,
        };
        assert!(OutputManager::new(&args, &config).is_json());
    }

    #[test]
    fn spinner_only_for_humans() {
        assert!(make_manager(false, true, OutputFormat::Plain).spinner("x").is_none());
        assert!(make_manager(true, true, OutputFormat::Human).spinner("x").is_none());
    }
}
