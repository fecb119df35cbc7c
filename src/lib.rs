//! # Debugpoints
//!
//! Breakpoint management for debug sessions: bulk operations over
//! categorized breakpoints, one-time breakpoints that retire themselves
//! after their first hit, and auto-continue past stops in files the user
//! has asked to ignore.
//!
//! The workspace is organized as components:
//!
//! - [`debugpoints_host`](../debugpoints_host) - the traits an editor host implements
//! - [`debugpoints_breakpoint`](../debugpoints_breakpoint) - breakpoint classification and display
//! - [`debugpoints_engine`](../debugpoints_engine) - scope resolution, ignore matching, bulk actions
//! - [`debugpoints_config`](../debugpoints_config) - the persisted ignore-pattern list
//! - [`debugpoints_session`](../debugpoints_session) - the debug-event interpreter
//! - [`debugpoints_commands`](../debugpoints_commands) - the named command surface
//!
//! This crate ties them together in [`Extension`] and provides the `replay`
//! binary for running recorded debug-event streams against an in-memory
//! host.

use structopt::StructOpt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod extension;
mod replay;

pub use extension::Extension;

const DEFAULT_LOG: &str = "warn,debugpoints=info";

#[derive(StructOpt)]
pub struct Options {
    #[structopt(long, default_value = DEFAULT_LOG)]
    log: String,

    #[structopt(subcommand)]
    cmd: Command,
}

impl Options {
    pub async fn main(&self) -> debugpoints_util::Fallible<()> {
        // Configure which modules/level/etc using the `DEBUGPOINTS_LOG`
        // environment variable if present, else the `--log` parameter.
        let subscriber = tracing_subscriber::registry()
            .with(match std::env::var("DEBUGPOINTS_LOG") {
                Ok(env) => EnvFilter::new(env),
                Err(_) => EnvFilter::new(&self.log),
            })
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_ansi(true),
            );
        tracing::subscriber::set_global_default(subscriber)?;

        match &self.cmd {
            Command::Replay(command_options) => command_options.main().await?,
        }
        Ok(())
    }
}

#[derive(StructOpt)]
pub enum Command {
    /// Feed a recorded debug-event stream through the interpreter.
    Replay(replay::Options),
}
