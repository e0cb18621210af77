//! bootstrap-demo
//!
//! `bootstrap demo.Hello --load=target/debug world` で起動できるサンプルアーカイブ。

use std::sync::Arc;

use bootstrap_core::{Bootstrapable, EntryPoint, LoadingContext, RegistryError, SymbolRegistry};

pub const GREETING: &str = "demo.greeting";

pub struct HelloApp {
    args: Vec<String>,
    greeting: Arc<String>,
}

impl Bootstrapable for HelloApp {
    fn set_arguments(&mut self, args: Vec<String>) {
        self.args = args;
    }

    fn arguments(&self) -> &[String] {
        &self.args
    }

    fn run(&mut self) {
        println!("{}", self.message());
    }
}

impl HelloApp {
    pub fn message(&self) -> String {
        if self.args.is_empty() {
            format!("{}, bootstrap!", self.greeting)
        } else {
            format!("{}, {}!", self.greeting, self.args.join(" "))
        }
    }
}

impl EntryPoint for HelloApp {
    const NAME: &'static str = "demo.Hello";

    fn create(context: Arc<LoadingContext>) -> Self {
        let greeting = context
            .component::<String>(GREETING)
            .unwrap_or_else(|| Arc::new("Hello".to_string()));
        Self {
            args: Vec::new(),
            greeting,
        }
    }
}

pub fn register(registry: &mut SymbolRegistry) -> Result<(), RegistryError> {
    registry.register::<HelloApp>()?;
    registry.register_component(GREETING, Arc::new("Hello".to_string()))?;
    Ok(())
}

bootstrap_core::export_entry_points!(with register);
