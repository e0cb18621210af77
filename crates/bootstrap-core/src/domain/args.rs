//! LaunchArgs - argv をターゲット名・classpath 要素・パススルー引数に分割する
//!
//! # 規則
//! - argv[0] がターゲットのエントリポイント名
//! - `--load=<path>` は classpath 要素（何度でも指定可）
//! - それ以外は順序を保ったままパススルー
//!
//! classpath 要素は `OsString` のまま `PathBuf` にする（UTF-8 でないパスも読める）。
//! ターゲット名とパススルー引数は `String` で渡すので、UTF-8 でなければエラー。

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use crate::error::LaunchError;

/// classpath 要素を指定するフラグ。値は `=` の後ろ
pub const LOAD_FLAG: &str = "--load";

pub const USAGE: &str = "[USAGE] bootstrap <entry point> --load=<classpath element> <args>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchArgs {
    pub target: String,
    pub classpath: Vec<PathBuf>,
    pub passthrough: Vec<String>,
}

impl LaunchArgs {
    /// argv を分割する
    ///
    /// # Errors
    /// - 空なら `LaunchError::Usage`
    /// - ターゲット名・パススルー引数が UTF-8 でなければ `LaunchError::NonUnicodeArgument`
    pub fn parse<I, S>(argv: I) -> Result<Self, LaunchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let target = into_string(argv.next().ok_or(LaunchError::Usage)?)?;

        let mut classpath = Vec::new();
        let mut passthrough = Vec::new();
        for arg in argv {
            match load_value(&arg) {
                Some(path) => classpath.push(PathBuf::from(path)),
                None => passthrough.push(into_string(arg)?),
            }
        }

        Ok(Self {
            target,
            classpath,
            passthrough,
        })
    }
}

fn into_string(arg: OsString) -> Result<String, LaunchError> {
    arg.into_string().map_err(LaunchError::NonUnicodeArgument)
}

/// `--load=<path>` なら `<path>` を返す。`--loader` のような別トークンは対象外
fn load_value(arg: &OsStr) -> Option<&OsStr> {
    let rest = arg
        .as_encoded_bytes()
        .strip_prefix(LOAD_FLAG.as_bytes())?
        .strip_prefix(b"=")?;
    // SAFETY: 取り除いたのは ASCII の接頭辞だけなので、rest は arg 由来の有効な境界から始まる
    Some(unsafe { OsStr::from_encoded_bytes_unchecked(rest) })
}
