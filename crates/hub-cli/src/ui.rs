//! Terminal-dependent presentation choices, decided once at startup.
//!
//! `--color`, `--format` and `--quiet` combine with what the terminal looks
//! like to decide whether tables are coloured, how wide they may be, and
//! whether the delete confirmation may prompt.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

/// Narrower `COLUMNS` values are ignored; tables are left unshrunk.
const MIN_TERM_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub table_color: bool,
    /// A person can answer the delete confirmation.
    pub interactive: bool,
    pub term_width: Option<usize>,
}

/// What the process can see of its terminal.
#[derive(Clone, Debug, Default)]
pub struct Terminal {
    pub stdout_tty: bool,
    pub stdin_tty: bool,
    pub stderr_tty: bool,
    pub no_color: bool,
    pub columns: Option<String>,
}

impl Terminal {
    fn detect() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            stdin_tty: std::io::stdin().is_terminal(),
            stderr_tty: std::io::stderr().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            columns: std::env::var("COLUMNS").ok(),
        }
    }
}

impl UiPrefs {
    #[must_use]
    pub fn decide(flags: &GlobalFlags, terminal: &Terminal) -> Self {
        let table = flags.format == OutputFormat::Table;
        let table_color = table
            && match flags.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => terminal.stdout_tty && !terminal.no_color && !flags.quiet,
            };

        // The question goes to stderr and the answer comes from stdin.
        let interactive = terminal.stdin_tty && terminal.stderr_tty;

        let term_width = terminal
            .columns
            .as_deref()
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|width| *width >= MIN_TERM_WIDTH);

        Self {
            table_color,
            interactive,
            term_width,
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(UiPrefs::decide(flags, &Terminal::detect()));
}

/// Preferences set by [`init`]; plain and non-interactive before it runs.
#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}
