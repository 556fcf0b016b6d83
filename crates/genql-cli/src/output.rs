//! Where genql writes what.
//!
//! Command results go to stdout: printed model blocks, `--format json`
//! objects and tab-separated plain rows. Notices about the run (a document
//! written, a dry run, an overwrite warning, a failure) go to stderr, so
//! `genql show User > user.prisma` captures only the block.

use console::{Style, Term};

use crate::cli::GlobalOpts;
use crate::diagnostic::spec_report;
use crate::error::CliError;

/// Rendering selected by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

impl OutputMode {
    /// Maps a `--format` value. Clap only admits the three known names.
    pub fn from_flag(format: &str) -> Self {
        match format {
            "json" => Self::Json,
            "plain" => Self::Plain,
            _ => Self::Human,
        }
    }
}

/// A one-line stderr notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notice {
    /// A document was created or patched.
    Written,
    Warning,
    Failure,
}

impl Notice {
    /// Key used in json and plain output.
    fn key(self) -> &'static str {
        match self {
            Self::Written => "ok",
            Self::Warning => "warning",
            Self::Failure => "error",
        }
    }

    fn human_label(self) -> &'static str {
        match self {
            Self::Written => "ok",
            Self::Warning => "warning:",
            Self::Failure => "error:",
        }
    }

    fn style(self) -> Style {
        let style = match self {
            Self::Written => Style::new().green(),
            Self::Warning => Style::new().yellow(),
            Self::Failure => Style::new().red(),
        };
        style.bold()
    }
}

/// Output settings resolved once from the global flags.
pub struct OutputContext {
    pub mode: OutputMode,
    pub quiet: bool,
    /// Color stderr labels; off for `--no-color`, `TERM=dumb` or a non-tty.
    pub use_color: bool,
}

impl OutputContext {
    pub fn from_global(global: &GlobalOpts) -> Self {
        let use_color = !global.no_color
            && std::env::var("TERM").map_or(true, |t| t != "dumb")
            && Term::stderr().is_term();

        Self {
            mode: OutputMode::from_flag(&global.format),
            quiet: global.quiet,
            use_color,
        }
    }

    /// `ok <msg>` after a document write. Human mode only.
    pub fn success(&self, msg: &str) {
        if self.mode == OutputMode::Human && !self.quiet {
            eprintln!("{}", self.notice_line(Notice::Written, msg));
        }
    }

    /// Warns in every mode unless `--quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            eprintln!("{}", self.notice_line(Notice::Warning, msg));
        }
    }

    /// Reports the error that ends the run; never silenced by `--quiet`.
    ///
    /// A rejected field token is drawn as a diagnostic underlining the bad
    /// part of the token. Json mode emits the error object from
    /// [`CliError::to_json`].
    pub fn print_error(&self, err: &CliError) {
        let report = match (self.mode, err) {
            (OutputMode::Json, _) => {
                eprintln!("{}", err.to_json());
                return;
            }
            (OutputMode::Human, CliError::Dsl(dsl)) => spec_report(dsl),
            _ => None,
        };
        match report {
            Some(report) => eprintln!("{report:?}"),
            None => eprintln!("{}", self.notice_line(Notice::Failure, &err.to_string())),
        }
    }

    /// Pretty-printed result object on stdout.
    pub fn print_json(&self, value: &serde_json::Value) {
        if let Ok(s) = serde_json::to_string_pretty(value) {
            println!("{s}");
        }
    }

    /// Unlabelled progress line, such as `patched: Book`. Human mode only.
    pub fn status(&self, msg: &str) {
        if self.mode == OutputMode::Human && !self.quiet {
            eprintln!("{msg}");
        }
    }

    fn notice_line(&self, notice: Notice, msg: &str) -> String {
        match self.mode {
            OutputMode::Human if self.use_color => {
                format!("{} {msg}", notice.style().apply_to(notice.human_label()))
            }
            OutputMode::Human => format!("{} {msg}", notice.human_label()),
            OutputMode::Json => {
                let mut object = serde_json::Map::new();
                object.insert(notice.key().to_string(), msg.into());
                serde_json::Value::Object(object).to_string()
            }
            OutputMode::Plain => format!("{}\t{msg}", notice.key()),
        }
    }
}
