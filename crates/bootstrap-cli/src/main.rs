use std::ffi::OsString;
use std::process::ExitCode;
use std::sync::Arc;

use bootstrap_core::domain::USAGE;
use bootstrap_core::logging::init_logging;
use bootstrap_core::{
    Bootstrapable, EntryPoint, LaunchError, Launcher, LoadingContext, RegistryError,
    SymbolRegistry,
};
use log::info;

/// 組み込みのエントリポイント。引数を 1 行ずつ出力する
struct EchoApp {
    args: Vec<String>,
}

impl Bootstrapable for EchoApp {
    fn set_arguments(&mut self, args: Vec<String>) {
        self.args = args;
    }

    fn arguments(&self) -> &[String] {
        &self.args
    }

    fn run(&mut self) {
        for arg in &self.args {
            println!("{arg}");
        }
    }
}

impl EntryPoint for EchoApp {
    const NAME: &'static str = "bootstrap.echo";

    fn create(_context: Arc<LoadingContext>) -> Self {
        Self { args: Vec::new() }
    }
}

fn builtins() -> Result<SymbolRegistry, RegistryError> {
    let mut registry = SymbolRegistry::new();
    registry.register::<EchoApp>()?;
    Ok(registry)
}

fn run(argv: Vec<OsString>) -> Result<(), LaunchError> {
    // (A) 組み込みを用意して起動（ここで失敗したらワーカーは存在しない）
    let handle = Launcher::new(builtins()?).launch(argv)?;

    // (B) ワーカーが終わるまでプロセスを生かしておく
    let launch_id = handle.launch_id();
    handle.join()?;
    info!("{launch_id}: worker finished");
    Ok(())
}

fn main() -> ExitCode {
    let argv: Vec<OsString> = std::env::args_os().skip(1).collect();

    if let Err(err) = init_logging("info") {
        eprintln!("warning: {err}");
    }

    match run(argv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(LaunchError::Usage) => {
            println!("{USAGE}");
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("{}", err.trace());
            ExitCode::from(1)
        }
    }
}
