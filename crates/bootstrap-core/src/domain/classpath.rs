//! Classpath 解決 - `--load=` の値をアーカイブファイルの平坦なリストに展開する
//!
//! # 規則
//! - 存在しないパスは黙ってスキップ
//! - ディレクトリは直下のみ列挙し、拡張子が一致するエントリを列挙順に追加
//! - ファイルは拡張子が一致する場合のみ追加
//! - 同じパスは最初に見つかった位置だけ残す
//!
//! アーカイブ = プラットフォームの動的ライブラリ（`so` / `dylib` / `dll`）。
//! 拡張子は小文字・大文字の 2 通りだけを受け付ける（`So` のような混在は対象外）。

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::LaunchError;

pub fn archive_extension() -> &'static str {
    std::env::consts::DLL_EXTENSION
}

/// ファイル名だけを見て判定する（存在チェックはしない）
pub fn is_archive(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy();
    let ext = archive_extension();
    name.ends_with(&format!(".{ext}")) || name.ends_with(&format!(".{}", ext.to_uppercase()))
}

/// 解決済み classpath（発見順、重複なし）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedClasspath {
    archives: Vec<PathBuf>,
}

impl ResolvedClasspath {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未登録なら末尾に追加する
    pub fn push(&mut self, archive: PathBuf) {
        if !self.archives.contains(&archive) {
            self.archives.push(archive);
        }
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.archives
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.archives.iter()
    }

    pub fn len(&self) -> usize {
        self.archives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }

    pub fn into_inner(self) -> Vec<PathBuf> {
        self.archives
    }
}

impl<'a> IntoIterator for &'a ResolvedClasspath {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// classpath 要素を順に展開する
///
/// # Errors
/// - 存在するディレクトリが読めない場合 `LaunchError::Classpath`
/// - 存在確認そのものに失敗した場合（権限など）も同じ
pub fn resolve_classpath<P: AsRef<Path>>(
    elements: &[P],
) -> Result<ResolvedClasspath, LaunchError> {
    let mut resolved = ResolvedClasspath::new();
    for element in elements {
        resolve_element(element.as_ref(), &mut resolved)?;
    }
    Ok(resolved)
}

fn resolve_element(path: &Path, resolved: &mut ResolvedClasspath) -> Result<(), LaunchError> {
    let exists = path.try_exists().map_err(|source| classpath_error(path, source))?;
    if !exists {
        debug!("skipping missing classpath element {}", path.display());
        return Ok(());
    }

    if path.is_dir() {
        let entries = fs::read_dir(path).map_err(|source| classpath_error(path, source))?;
        for entry in entries {
            let entry = entry.map_err(|source| classpath_error(path, source))?;
            let entry_path = entry.path();
            if is_archive(&entry_path) {
                resolved.push(entry_path);
            }
        }
    } else if is_archive(path) {
        resolved.push(path.to_path_buf());
    } else {
        debug!("skipping non-archive classpath element {}", path.display());
    }
    Ok(())
}

fn classpath_error(path: &Path, source: std::io::Error) -> LaunchError {
    LaunchError::Classpath {
        path: path.to_path_buf(),
        source,
    }
}
