//! bootstrap-core
//!
//! 動的ライブラリ（アーカイブ）からエントリポイントを名前で解決し、
//! 専用のワーカースレッドで起動するためのビルディングブロック。
//!
//! # モジュール構成
//! - **domain**: LaunchId, argv の分割, classpath の展開
//! - **typed**: `Bootstrapable` 契約, `EntryPoint`, `SymbolRegistry`
//! - **app**: `LoadingContext`, `Launcher`, `LaunchHandle`
//! - **error**: `LaunchError`
//! - **logging**: stderr ロガーの初期化

pub mod app;
pub mod domain;
pub mod error;
pub mod logging;
pub mod typed;

pub use app::{ABI_VERSION, LaunchHandle, LaunchPlan, Launcher, LoadingContext};
pub use error::LaunchError;
pub use typed::{Bootstrapable, EntryPoint, RegistryError, SymbolRegistry};

/// アーカイブ側で `bootstrap_abi_version` と `bootstrap_register` を export する
///
/// # 使用例
/// ```ignore
/// // 型を列挙する
/// bootstrap_core::export_entry_points!(HelloApp, GoodbyeApp);
///
/// // コンポーネントも登録したい場合は登録関数を渡す
/// fn register(registry: &mut SymbolRegistry) -> Result<(), RegistryError> { ... }
/// bootstrap_core::export_entry_points!(with register);
/// ```
#[macro_export]
macro_rules! export_entry_points {
    (with $register:path) => {
        #[unsafe(no_mangle)]
        pub fn bootstrap_abi_version() -> u32 {
            $crate::ABI_VERSION
        }

        #[unsafe(no_mangle)]
        pub fn bootstrap_register(
            registry: &mut $crate::SymbolRegistry,
        ) -> ::std::result::Result<(), $crate::RegistryError> {
            $register(registry)
        }
    };
    ($($entry:ty),+ $(,)?) => {
        #[unsafe(no_mangle)]
        pub fn bootstrap_abi_version() -> u32 {
            $crate::ABI_VERSION
        }

        #[unsafe(no_mangle)]
        pub fn bootstrap_register(
            registry: &mut $crate::SymbolRegistry,
        ) -> ::std::result::Result<(), $crate::RegistryError> {
            $( registry.register::<$entry>()?; )+
            Ok(())
        }
    };
}
