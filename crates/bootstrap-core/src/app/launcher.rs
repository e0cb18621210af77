//! Launcher - argv からエントリポイントを起動する
//!
//! # フロー
//! 1. argv を分割（空なら Usage。ここまでは何も読み込まない）
//! 2. `--load=` の値を classpath に展開
//! 3. LoadingContext を構築
//! 4. ターゲット名を解決してインスタンス生成
//! 5. パススルー引数を `set_arguments` で渡す
//! 6. ワーカースレッドで `run` を開始し、LaunchHandle を返す
//!
//! 途中の失敗はすべて `LaunchError` として呼び出し元に返す。
//! 何も永続化していないのでロールバックはしない。

use std::any::Any;
use std::ffi::OsString;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{error, info};

use super::context::LoadingContext;
use crate::domain::{LaunchArgs, LaunchId, ResolvedClasspath, resolve_classpath};
use crate::error::LaunchError;
use crate::typed::{Bootstrapable, SymbolRegistry};

/// 手順 1〜2 の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub launch_id: LaunchId,
    pub target: String,
    pub classpath: ResolvedClasspath,
    pub passthrough: Vec<String>,
}

pub struct Launcher {
    builtins: SymbolRegistry,
}

impl Launcher {
    /// `builtins` は classpath より先に解決される組み込みシンボル
    pub fn new(builtins: SymbolRegistry) -> Self {
        Self { builtins }
    }

    /// argv の分割と classpath の展開だけを行う
    pub fn plan<I, S>(argv: I) -> Result<LaunchPlan, LaunchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let args = LaunchArgs::parse(argv)?;
        let classpath = resolve_classpath(&args.classpath)?;
        Ok(LaunchPlan {
            launch_id: LaunchId::new(),
            target: args.target,
            classpath,
            passthrough: args.passthrough,
        })
    }

    pub fn launch<I, S>(self, argv: I) -> Result<LaunchHandle, LaunchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let plan = Self::plan(argv)?;
        self.launch_plan(plan)
    }

    pub fn launch_plan(self, plan: LaunchPlan) -> Result<LaunchHandle, LaunchError> {
        let LaunchPlan {
            launch_id,
            target,
            classpath,
            passthrough,
        } = plan;
        info!(
            "{launch_id}: resolving {target} with {} archive(s)",
            classpath.len()
        );

        // SAFETY: コマンドラインで明示的に指定されたアーカイブだけを読み込む
        let context = unsafe { LoadingContext::builder(self.builtins).load_all(&classpath)? }.build();

        let mut instance = context.instantiate(&target)?;
        instance.set_arguments(passthrough);

        let worker = Worker {
            instance,
            _context: Arc::clone(&context),
        };
        let join = thread::Builder::new()
            .name(format!("bootstrap-{launch_id}"))
            .spawn(move || worker.run())
            .map_err(LaunchError::Spawn)?;
        info!("{launch_id}: started {target}");

        Ok(LaunchHandle {
            launch_id,
            context,
            join,
        })
    }
}

/// ワーカースレッドが所有するもの
struct Worker {
    // インスタンスのコードはアーカイブ内にあるので、context より先に drop する
    instance: Box<dyn Bootstrapable>,
    _context: Arc<LoadingContext>,
}

impl Worker {
    fn run(mut self) {
        self.instance.run();
    }
}

/// 起動済みワーカーへのハンドル
///
/// drop しても ワーカーは止まらない（detach される）。
pub struct LaunchHandle {
    launch_id: LaunchId,
    context: Arc<LoadingContext>,
    join: JoinHandle<()>,
}

impl LaunchHandle {
    pub fn launch_id(&self) -> LaunchId {
        self.launch_id
    }

    pub fn context(&self) -> &Arc<LoadingContext> {
        &self.context
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// ワーカーの終了を待つ
    ///
    /// # Errors
    /// - `run` が panic した場合 `LaunchError::WorkerPanicked`
    pub fn join(self) -> Result<(), LaunchError> {
        let launch_id = self.launch_id;
        self.join.join().map_err(|payload| {
            let message = panic_message(payload.as_ref());
            error!("{launch_id}: worker panicked: {message}");
            LaunchError::WorkerPanicked(message)
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
