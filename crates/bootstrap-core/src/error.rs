//! LaunchError - 起動フロー全体のエラー型
//!
//! `main` まで `?` でそのまま伝播させ、トップレベルで一括して診断出力する。
//! 存在しないパスや拡張子違いのファイルはエラーではない（黙ってスキップ）。

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::typed::RegistryError;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no target entry point given")]
    Usage,

    #[error("argument is not valid unicode: {}", .0.to_string_lossy())]
    NonUnicodeArgument(OsString),

    #[error("failed to read classpath element {}", path.display())]
    Classpath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to load archive {}", path.display())]
    Library {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("archive {} was built against abi version {found}, expected {expected}", path.display())]
    AbiMismatch {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("entry point not found: {0}")]
    NotFound(String),

    #[error("symbol {0} does not implement Bootstrapable")]
    NotAnEntryPoint(String),

    #[error("failed to spawn worker thread")]
    Spawn(#[source] io::Error),

    #[error("worker thread panicked: {0}")]
    WorkerPanicked(String),
}

impl LaunchError {
    /// 診断用に source チェーンを含めた複数行の文字列を作る
    pub fn trace(&self) -> String {
        let mut out = format!("error: {self}");
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(&format!("\n  caused by: {cause}"));
            source = cause.source();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_includes_source_chain() {
        let err = LaunchError::Classpath {
            path: PathBuf::from("/libs"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let trace = err.trace();
        assert!(trace.starts_with("error: failed to read classpath element /libs"));
        assert!(trace.contains("caused by: denied"));
    }

    #[test]
    fn trace_without_source_is_single_line() {
        let err = LaunchError::NotFound("com.example.App".to_string());
        assert_eq!(err.trace(), "error: entry point not found: com.example.App");
    }
}
