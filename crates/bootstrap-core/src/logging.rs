//! ロギング初期化（stderr、プロセスにつき 1 回）
//!
//! - 同じレベルでの再初期化は何もしない
//! - 別レベルへの切り替えは拒否する
//! - 設定ファイル・環境変数は読まない

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};
use log::debug;
use once_cell::sync::OnceCell;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    _logger: LoggerHandle,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("unsupported log level `{0}`; expected trace|debug|info|warn|error")]
    UnsupportedLevel(String),

    #[error("logging already initialized with level `{active}`; refusing to switch to `{requested}`")]
    LevelConflict {
        active: &'static str,
        requested: &'static str,
    },

    #[error("failed to start logger")]
    Backend(#[from] FlexiLoggerError),
}

pub fn init_logging(level: &str) -> Result<(), LoggingError> {
    let level = normalize_level(level)?;

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, LoggingError> {
        let logger = Logger::try_with_str(level)?
            .log_to_stderr()
            .format(flexi_logger::default_format)
            .start()?;
        debug!("logging initialized level={level}");
        Ok(LoggingState {
            level,
            _logger: logger,
        })
    })?;

    if state.level != level {
        return Err(LoggingError::LevelConflict {
            active: state.level,
            requested: level,
        });
    }
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::upper("INFO", "info")]
    #[case::padded(" warning ", "warn")]
    #[case::trace("trace", "trace")]
    fn normalize_level_accepts_known_values(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_level(input).unwrap(), expected);
    }

    #[test]
    fn normalize_level_rejects_unknown_values() {
        let err = normalize_level("verbose").unwrap_err();
        assert!(matches!(err, LoggingError::UnsupportedLevel(level) if level == "verbose"));
    }

    #[test]
    fn init_logging_is_idempotent_and_rejects_conflicts() {
        init_logging("info").unwrap();
        init_logging("INFO").unwrap();

        let err = init_logging("debug").unwrap_err();
        assert!(err.to_string().contains("refusing to switch"));
    }
}
