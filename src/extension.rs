//! The activated extension: the command surface plus the per-session
//! event interpreter, over one host.

use std::sync::Arc;

use debugpoints_commands::{CommandContext, CommandRegistry, register_all};
use debugpoints_config::{CONFIG_SECTION, IgnoreList, SharedIgnoreList};
use debugpoints_host::{DebugMessage, Host};
use debugpoints_session::Interpreter;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Extension<H: Host> {
    host: Arc<H>,
    ignore_list: SharedIgnoreList,
    registry: CommandRegistry<H>,
    session: Option<JoinHandle<()>>,
}

impl<H: Host> Extension<H> {
    /// Loads the persisted ignore list and registers the full command
    /// surface.
    pub fn activate(host: Arc<H>) -> Self {
        let ignore_list = IgnoreList::load_shared(&*host);
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        tracing::info!(commands = registry.names().len(), "extension activated");
        Self {
            host,
            ignore_list,
            registry,
            session: None,
        }
    }

    pub fn command_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    pub fn ignore_list(&self) -> &SharedIgnoreList {
        &self.ignore_list
    }

    /// Runs one command to completion. A failure is reported to the user
    /// and logged; it never propagates past the invocation.
    pub async fn invoke(&self, name: &str) {
        let context = CommandContext {
            host: Arc::clone(&self.host),
            ignore_list: Arc::clone(&self.ignore_list),
        };
        if let Err(error) = self.registry.invoke(name, &context).await {
            tracing::error!(%error, command = name, "command failed");
            self.host.show_error(&format!("{name}: {error}"));
        }
    }

    /// Starts interpreting a new debug session's message stream. Any
    /// previously attached session is detached first; its unprocessed
    /// messages are dropped with it.
    pub fn attach_session(&mut self, messages: mpsc::Receiver<DebugMessage>) {
        self.detach_session();
        let interpreter = Interpreter::new(Arc::clone(&self.host), Arc::clone(&self.ignore_list));
        self.session = Some(tokio::spawn(interpreter.run(messages)));
    }

    pub fn detach_session(&mut self) {
        if let Some(session) = self.session.take() {
            session.abort();
        }
    }

    /// Waits until the attached session's stream closes.
    pub async fn session_closed(&mut self) {
        if let Some(session) = self.session.take() {
            session.await.ok();
        }
    }

    /// Host notification that configuration changed; reloads the ignore
    /// list when our section is affected.
    pub fn on_configuration_changed(&self, section: &str) {
        if section == CONFIG_SECTION {
            self.ignore_list.lock().unwrap().reload(&*self.host);
            self.host.refresh_ignore_view();
        }
    }
}

impl<H: Host> Drop for Extension<H> {
    fn drop(&mut self) {
        self.detach_session();
    }
}
