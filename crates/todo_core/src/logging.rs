//! Process-wide logging bootstrap.
//!
//! # Responsibility
//! - Start a rolling file logger at most once per process.
//! - Keep log lines metadata-only (`key=value`), never task text.
//!
//! # Invariants
//! - Repeating `init_logging` with equal settings is a no-op.
//! - Once active, the settings are fixed; a different level or directory is
//!   reported as `LoggingError::AlreadyActive`.
//! - Nothing in this module panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::PanicHookInfo;
use std::path::{Path, PathBuf};

const FILE_BASENAME: &str = "todo";
// A CLI session is short; a few small files are plenty.
const ROTATE_AT_BYTES: u64 = 2 * 1024 * 1024;
const ROTATED_FILES_KEPT: usize = 3;
const PANIC_TEXT_LIMIT: usize = 200;

static SESSION: OnceCell<LogSession> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Validated logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: &'static str,
    pub log_dir: PathBuf,
}

impl LogSettings {
    /// Normalizes a user-supplied level and directory.
    pub fn parse(level: &str, log_dir: &str) -> Result<Self, LoggingError> {
        let level = match level.trim().to_ascii_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" | "warning" => "warn",
            "error" => "error",
            other => return Err(LoggingError::UnknownLevel(other.to_string())),
        };

        let dir = log_dir.trim();
        if dir.is_empty() {
            return Err(LoggingError::MissingDir);
        }
        let log_dir = PathBuf::from(dir);
        if !log_dir.is_absolute() {
            return Err(LoggingError::RelativeDir(log_dir));
        }

        Ok(Self { level, log_dir })
    }
}

/// Logging bootstrap failure.
#[derive(Debug)]
pub enum LoggingError {
    UnknownLevel(String),
    MissingDir,
    RelativeDir(PathBuf),
    CreateDir { dir: PathBuf, source: std::io::Error },
    Backend(flexi_logger::FlexiLoggerError),
    AlreadyActive { active: LogSettings },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(level) => write!(
                f,
                "log level `{level}` is not one of trace, debug, info, warn, error"
            ),
            Self::MissingDir => write!(f, "a log directory is required"),
            Self::RelativeDir(dir) => {
                write!(f, "log directory `{}` is not an absolute path", dir.display())
            }
            Self::CreateDir { dir, source } => {
                write!(f, "cannot create log directory `{}`: {source}", dir.display())
            }
            Self::Backend(err) => write!(f, "log backend did not start: {err}"),
            Self::AlreadyActive { active } => write!(
                f,
                "logging is already active (level `{}`, directory `{}`)",
                active.level,
                active.log_dir.display()
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

struct LogSession {
    settings: LogSettings,
    _handle: LoggerHandle,
}

impl LogSession {
    fn check(&self, requested: &LogSettings) -> Result<(), LoggingError> {
        if &self.settings == requested {
            Ok(())
        } else {
            Err(LoggingError::AlreadyActive {
                active: self.settings.clone(),
            })
        }
    }
}

/// Starts file logging under `log_dir` at `level`.
///
/// The first successful call fixes the settings for the rest of the process.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), LoggingError> {
    let requested = LogSettings::parse(level, log_dir)?;
    let session = SESSION.get_or_try_init(|| open_session(requested.clone()))?;
    session.check(&requested)
}

/// Returns the active settings, if logging was started.
pub fn logging_status() -> Option<LogSettings> {
    SESSION.get().map(|session| session.settings.clone())
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn open_session(settings: LogSettings) -> Result<LogSession, LoggingError> {
    std::fs::create_dir_all(&settings.log_dir).map_err(|source| LoggingError::CreateDir {
        dir: settings.log_dir.clone(),
        source,
    })?;

    let handle = Logger::try_with_str(settings.level)
        .map_err(LoggingError::Backend)?
        .log_to_file(file_spec(&settings.log_dir))
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(ROTATED_FILES_KEPT),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(LoggingError::Backend)?;

    if PANIC_HOOK.set(()).is_ok() {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            error!(
                "event=panic module=core status=error {}",
                describe_panic(panic_info)
            );
            previous(panic_info);
        }));
    }

    info!(
        "event=logging_init module=core status=ok level={} log_dir={} version={}",
        settings.level,
        settings.log_dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(LogSession {
        settings,
        _handle: handle,
    })
}

fn file_spec(dir: &Path) -> FileSpec {
    FileSpec::default().directory(dir).basename(FILE_BASENAME)
}

fn describe_panic(panic_info: &PanicHookInfo<'_>) -> String {
    let location = match panic_info.location() {
        Some(loc) => format!("{}:{}", loc.file(), loc.line()),
        None => "unknown".to_string(),
    };
    let payload = panic_info.payload();
    let message = if let Some(text) = payload.downcast_ref::<&str>() {
        text
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.as_str()
    } else {
        "<non-string payload>"
    };
    format!(
        "location={location} payload={}",
        one_line(message, PANIC_TEXT_LIMIT)
    )
}

/// Replaces line breaks and caps at `limit` chars, marking cuts with `...`.
fn one_line(text: &str, limit: usize) -> String {
    let mut out = String::with_capacity(text.len().min(limit + 3));
    for (index, ch) in text.chars().enumerate() {
        if index == limit {
            out.push_str("...");
            break;
        }
        out.push(if matches!(ch, '\n' | '\r') { ' ' } else { ch });
    }
    out
}
