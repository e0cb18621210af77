//! Typed - エントリポイント契約とシンボル登録
//!
//! # 二層構造
//! - **表層（Typed）**: `EntryPoint` trait - 名前と生成関数を型に結び付ける
//! - **内部（Dyn）**: `Bootstrapable` trait object + `SymbolRegistry` - 名前で引ける

pub mod contract;
pub mod registry;

pub use self::contract::{Bootstrapable, EntryPoint};
pub use self::registry::{Constructor, RegistryError, Symbol, SymbolRegistry};
