//! App - 起動処理
//!
//! # 主要コンポーネント
//! - **LoadingContext**: 組み込み + アーカイブのシンボル解決スコープ
//! - **Launcher**: argv からワーカースレッドの起動まで
//! - **LaunchHandle**: 起動したワーカーの join / 観測

pub mod context;
pub mod launcher;

pub use self::context::{ABI_VERSION, LoadingContext, LoadingContextBuilder};
pub use self::launcher::{LaunchHandle, LaunchPlan, Launcher};
