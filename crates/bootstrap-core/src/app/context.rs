//! LoadingContext - classpath から構築するシンボル解決スコープ
//!
//! # 解決順序
//! 1. 組み込み（起動バイナリが登録したもの）
//! 2. アーカイブ（classpath の順）
//!
//! 最初に見つかったものを使う。構築中のみ追記でき、`build()` 後は不変。
//! スレッドローカルには置かず、`Arc<LoadingContext>` をコンストラクタと
//! ワーカーに明示的に渡す。
//!
//! # アーカイブの要件
//! 動的ライブラリは次の 2 つを export する（`export_entry_points!` が生成する）:
//! - `bootstrap_abi_version() -> u32` … `ABI_VERSION` と一致すること
//! - `bootstrap_register(&mut SymbolRegistry) -> Result<(), RegistryError>`
//!
//! どちらも Rust ABI なので、ランチャーと同じコンパイラ・同じ `bootstrap-core`
//! でビルドしたアーカイブしか読めない。`ABI_VERSION` はその最低限の確認。
//!
//! アーカイブは `log` を静的リンクした別コピーを持つので、ランチャーのロガーには
//! 出力されない。アーカイブ側のログが必要ならロガーを明示的に渡すこと（未対応）。

use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use libloading::Library;
use log::info;

use crate::domain::ResolvedClasspath;
use crate::error::LaunchError;
use crate::typed::{Bootstrapable, RegistryError, Symbol, SymbolRegistry};

/// アーカイブと共有する型（`SymbolRegistry`, `Bootstrapable`）のレイアウトが変わったら上げる
pub const ABI_VERSION: u32 = 1;

pub const ABI_VERSION_SYMBOL: &[u8] = b"bootstrap_abi_version";
pub const REGISTER_SYMBOL: &[u8] = b"bootstrap_register";

pub type AbiVersionFn = fn() -> u32;
pub type RegisterFn = fn(&mut SymbolRegistry) -> Result<(), RegistryError>;

struct LoadedArchive {
    path: PathBuf,
    // registry の中のクロージャは library のコードを指すので、先に drop する
    registry: SymbolRegistry,
    _library: Library,
}

pub struct LoadingContext {
    builtins: SymbolRegistry,
    archives: Vec<LoadedArchive>,
}

impl LoadingContext {
    pub fn builder(builtins: SymbolRegistry) -> LoadingContextBuilder {
        LoadingContextBuilder {
            context: LoadingContext {
                builtins,
                archives: Vec::new(),
            },
        }
    }

    /// 組み込みもアーカイブも持たない context
    pub fn empty() -> Arc<Self> {
        Self::builder(SymbolRegistry::new()).build()
    }

    /// 読み込んだアーカイブのパス（classpath の順）
    pub fn archives(&self) -> Vec<&Path> {
        self.archives.iter().map(|a| a.path.as_path()).collect()
    }

    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.builtins
            .resolve(name)
            .or_else(|| self.archives.iter().find_map(|a| a.registry.resolve(name)))
    }

    /// 名前で登録されたコンポーネントを `T` として取り出す。型が違えば None
    pub fn component<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        match self.resolve(name)? {
            Symbol::Component(component) => Arc::clone(component).downcast::<T>().ok(),
            Symbol::EntryPoint(_) => None,
        }
    }

    /// 名前を解決してエントリポイントのインスタンスを作る
    ///
    /// # Errors
    /// - 名前が見つからない: `LaunchError::NotFound`
    /// - コンポーネントだった: `LaunchError::NotAnEntryPoint`
    pub fn instantiate(self: &Arc<Self>, name: &str) -> Result<Box<dyn Bootstrapable>, LaunchError> {
        let constructor = match self.resolve(name) {
            None => return Err(LaunchError::NotFound(name.to_string())),
            Some(Symbol::Component(_)) => {
                return Err(LaunchError::NotAnEntryPoint(name.to_string()));
            }
            Some(Symbol::EntryPoint(constructor)) => Arc::clone(constructor),
        };
        Ok(constructor(Arc::clone(self)))
    }
}

impl std::fmt::Debug for LoadingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingContext")
            .field("builtins", &self.builtins)
            .field("archives", &self.archives())
            .finish()
    }
}

/// 構築中の LoadingContext。アーカイブの追加だけができる
pub struct LoadingContextBuilder {
    context: LoadingContext,
}

impl LoadingContextBuilder {
    /// アーカイブを 1 つ読み込み、その registry を末尾に追加する
    ///
    /// # Safety
    /// 動的ライブラリを読み込むと初期化コードが走り、export された関数を呼ぶ。
    /// 呼び出し側はアーカイブが信頼でき、同じツールチェーンでビルドされていることを保証する。
    pub unsafe fn load(&mut self, path: &Path) -> Result<(), LaunchError> {
        info!("Adding {} to loading context", path.display());
        let library_error = |source| LaunchError::Library {
            path: path.to_path_buf(),
            source,
        };

        let library = unsafe { Library::new(path) }.map_err(library_error)?;
        let registry = {
            let abi_version = unsafe { library.get::<AbiVersionFn>(ABI_VERSION_SYMBOL) }
                .map_err(library_error)?;
            let found = abi_version();
            if found != ABI_VERSION {
                return Err(LaunchError::AbiMismatch {
                    path: path.to_path_buf(),
                    found,
                    expected: ABI_VERSION,
                });
            }

            let register =
                unsafe { library.get::<RegisterFn>(REGISTER_SYMBOL) }.map_err(library_error)?;
            let mut registry = SymbolRegistry::new();
            register(&mut registry)?;
            registry
        };
        info!(
            "archive {} registered {} symbol(s)",
            path.display(),
            registry.len()
        );

        self.context.archives.push(LoadedArchive {
            path: path.to_path_buf(),
            registry,
            _library: library,
        });
        Ok(())
    }

    /// classpath の全アーカイブを順に読み込む
    ///
    /// # Safety
    /// `load` と同じ
    pub unsafe fn load_all(mut self, classpath: &ResolvedClasspath) -> Result<Self, LaunchError> {
        for archive in classpath {
            unsafe { self.load(archive)? };
        }
        Ok(self)
    }

    pub fn build(self) -> Arc<LoadingContext> {
        Arc::new(self.context)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Mutex;

    use super::*;
    use crate::domain::archive_extension;
    use crate::typed::EntryPoint;
    use crate::typed::contract::fixtures::{RUN_LOG, RecordingApp, RunLog};

    fn builtins() -> SymbolRegistry {
        let mut registry = SymbolRegistry::new();
        registry.register::<RecordingApp>().unwrap();
        registry
            .register_component(RUN_LOG, Arc::new(RunLog::default()))
            .unwrap();
        registry
    }

    #[test]
    fn instantiates_builtin_entry_point() {
        let context = LoadingContext::builder(builtins()).build();

        let mut instance = context.instantiate(RecordingApp::NAME).unwrap();
        instance.set_arguments(vec!["foo".into()]);
        instance.run();

        let log = context.component::<RunLog>(RUN_LOG).unwrap();
        assert_eq!(*log.lock().unwrap(), vec![vec!["foo".to_string()]]);
    }

    #[test]
    fn missing_name_is_not_found() {
        let context = LoadingContext::empty();
        let err = context.instantiate("com.example.Missing").err().unwrap();
        assert!(matches!(err, LaunchError::NotFound(name) if name == "com.example.Missing"));
    }

    #[test]
    fn component_is_not_an_entry_point() {
        let context = LoadingContext::builder(builtins()).build();
        let err = context.instantiate(RUN_LOG).err().unwrap();
        assert!(matches!(err, LaunchError::NotAnEntryPoint(name) if name == RUN_LOG));
    }

    #[test]
    fn component_with_wrong_type_is_none() {
        let context = LoadingContext::builder(builtins()).build();
        assert!(context.component::<Mutex<u32>>(RUN_LOG).is_none());
        assert!(context.component::<RunLog>(RecordingApp::NAME).is_none());
        assert!(context.component::<RunLog>("missing").is_none());
    }

    #[test]
    fn invalid_archive_is_library_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("broken.{}", archive_extension()));
        fs::write(&path, b"not a shared library").unwrap();

        let mut builder = LoadingContext::builder(SymbolRegistry::new());
        let err = unsafe { builder.load(&path) }.unwrap_err();
        assert!(matches!(err, LaunchError::Library { path: p, .. } if p == path));
    }

    #[test]
    fn empty_classpath_builds_builtins_only() {
        let context = unsafe {
            LoadingContext::builder(builtins()).load_all(&ResolvedClasspath::new())
        }
        .unwrap()
        .build();

        assert!(context.archives().is_empty());
        assert!(context.resolve(RecordingApp::NAME).is_some());
    }
}
