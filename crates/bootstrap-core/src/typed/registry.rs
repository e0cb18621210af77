//! SymbolRegistry - 1 つのアーカイブ（または組み込み）が公開するシンボル表
//!
//! # 内部実装
//! - `register::<T: EntryPoint>()` で登録すると、生成関数を `Constructor` に型消去する
//! - エントリポイント以外の共有値は `register_component` で登録する
//! - HashMap<String, Symbol> で管理。構築時のみ可変、以降は読み取り専用

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::contract::{Bootstrapable, EntryPoint};
use crate::app::LoadingContext;

/// 型消去されたエントリポイントの生成関数
pub type Constructor =
    Arc<dyn Fn(Arc<LoadingContext>) -> Box<dyn Bootstrapable> + Send + Sync>;

/// 名前から引けるもの
#[derive(Clone)]
pub enum Symbol {
    EntryPoint(Constructor),
    Component(Arc<dyn Any + Send + Sync>),
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::EntryPoint(_) => f.write_str("Symbol::EntryPoint"),
            Symbol::Component(_) => f.write_str("Symbol::Component"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("symbol '{0}' is already registered")]
    AlreadyRegistered(String),
}

#[derive(Default)]
pub struct SymbolRegistry {
    symbols: HashMap<String, Symbol>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self {
            symbols: HashMap::new(),
        }
    }

    /// `T::NAME` で `T::create` を登録する
    ///
    /// # Example
    /// ```ignore
    /// registry.register::<MyApp>()?;
    /// ```
    pub fn register<T: EntryPoint>(&mut self) -> Result<(), RegistryError> {
        self.register_fn(T::NAME, |context| Box::new(T::create(context)))
    }

    /// 名前と生成クロージャを直接登録する
    pub fn register_fn<F>(&mut self, name: &str, constructor: F) -> Result<(), RegistryError>
    where
        F: Fn(Arc<LoadingContext>) -> Box<dyn Bootstrapable> + Send + Sync + 'static,
    {
        self.insert(name, Symbol::EntryPoint(Arc::new(constructor)))
    }

    /// エントリポイントではない共有値を登録する
    pub fn register_component<T: Any + Send + Sync>(
        &mut self,
        name: &str,
        component: Arc<T>,
    ) -> Result<(), RegistryError> {
        self.insert(name, Symbol::Component(component))
    }

    fn insert(&mut self, name: &str, symbol: Symbol) -> Result<(), RegistryError> {
        if self.symbols.contains_key(name) {
            return Err(RegistryError::AlreadyRegistered(name.to_string()));
        }
        self.symbols.insert(name.to_string(), symbol);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// 登録済みの名前（ソート済み）
    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.symbols.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl fmt::Debug for SymbolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolRegistry")
            .field("symbols", &self.registered_names())
            .finish()
    }
}
