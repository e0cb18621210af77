//! Bootstrapable - 起動対象が満たすべき契約
//!
//! # ライフサイクル
//! 1. `EntryPoint::create` で生成（LoadingContext を明示的に受け取る）
//! 2. `set_arguments` でランチャー自身のフラグを除いた引数を渡す
//! 3. ワーカースレッド上で `run` を 1 回だけ呼ぶ

use std::sync::Arc;

use crate::app::LoadingContext;

/// 起動可能なユニットの契約
///
/// `run` は呼び出したスレッド上で同期的に実行される。
/// 失敗の扱いは実装側の責務で、panic してもワーカースレッドが終わるだけ。
pub trait Bootstrapable: Send {
    /// ランチャーのフラグを取り除いた引数を保存する（上書き、検証なし）
    fn set_arguments(&mut self, args: Vec<String>);

    /// 最後に保存された引数。未設定なら空
    fn arguments(&self) -> &[String];

    fn run(&mut self);
}

/// 名前付きで登録できるエントリポイント
///
/// # 使用例
/// ```ignore
/// struct App { args: Vec<String> }
///
/// impl EntryPoint for App {
///     const NAME: &'static str = "com.example.App";
///
///     fn create(_context: Arc<LoadingContext>) -> Self {
///         Self { args: Vec::new() }
///     }
/// }
/// ```
///
/// # 命名規約
/// - 逆ドメイン形式（`com.example.App`）を推奨。ランチャー側では検証しない
pub trait EntryPoint: Bootstrapable + Sized + 'static {
    const NAME: &'static str;

    /// 引数なしコンストラクタに相当する。context は以降のシンボル解決に使える
    fn create(context: Arc<LoadingContext>) -> Self;
}
