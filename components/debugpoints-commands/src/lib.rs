//! The command surface: every operation the user can invoke by name
//! through the host command palette.

use std::path::PathBuf;
use std::sync::Arc;

use debugpoints_config::SharedIgnoreList;
use debugpoints_host::Host;
use debugpoints_util::{Fallible, Map, bail};
use futures::future::LocalBoxFuture;

mod asserts;
mod goto;
mod ignore_files;
mod manage;
mod triggered;

pub use asserts::ASSERT_PATTERN;

/// Everything a command handler can reach.
pub struct CommandContext<H: Host> {
    pub host: Arc<H>,
    pub ignore_list: SharedIgnoreList,
}

impl<H: Host> Clone for CommandContext<H> {
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
            ignore_list: Arc::clone(&self.ignore_list),
        }
    }
}

/// Prefixes a command suffix with the extension's namespace.
pub fn command_name(suffix: &str) -> String {
    format!("debugpoints.{suffix}")
}

type CommandHandler<H> = Box<dyn Fn(CommandContext<H>) -> LocalBoxFuture<'static, Fallible<()>>>;

/// Commands registered by name. Handlers run on the host's cooperative
/// loop; a failure inside one invocation is terminal to that invocation
/// only.
pub struct CommandRegistry<H: Host> {
    commands: Map<String, CommandHandler<H>>,
}

impl<H: Host> Default for CommandRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> CommandRegistry<H> {
    pub fn new() -> Self {
        Self {
            commands: Map::default(),
        }
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: impl Fn(CommandContext<H>) -> LocalBoxFuture<'static, Fallible<()>> + 'static,
    ) {
        self.commands.insert(name.into(), Box::new(handler));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub async fn invoke(&self, name: &str, context: &CommandContext<H>) -> Fallible<()> {
        let Some(handler) = self.commands.get(name) else {
            bail!("unknown command `{name}`");
        };
        handler(context.clone()).await
    }
}

/// Registers the full command surface.
pub fn register_all<H: Host>(registry: &mut CommandRegistry<H>) {
    manage::register(registry);

    registry.register(command_name("addTriggered"), |ctx| {
        Box::pin(triggered::add_triggered(ctx))
    });
    registry.register(command_name("listBreakPoints"), |ctx| {
        Box::pin(goto::list_breakpoints(ctx))
    });
    registry.register(command_name("addOnAssert"), |ctx| {
        Box::pin(asserts::add_on_assert(ctx))
    });
    registry.register(command_name("projectAddOnAssert"), |ctx| {
        Box::pin(asserts::project_add_on_assert(ctx))
    });
    registry.register(command_name("addIgnoreFile"), |ctx| {
        Box::pin(ignore_files::add_ignore_file(ctx))
    });
    registry.register(command_name("editIgnoreFile"), |ctx| {
        Box::pin(ignore_files::edit_ignore_file(ctx))
    });
    registry.register(command_name("deleteIgnoreFile"), |ctx| {
        Box::pin(ignore_files::delete_ignore_file(ctx))
    });
}

/// The path the workspace is anchored at: the first workspace folder, else
/// the single-file workspace, else the active editor's document.
pub fn current_path<H: Host>(host: &H) -> Option<PathBuf> {
    host.workspace_folders()
        .into_iter()
        .next()
        .or_else(|| host.workspace_file())
        .or_else(|| host.active_file())
}
