//! Replays a recorded debug-event stream against an in-memory host.
//!
//! The input file holds one JSON message per line, in the same shape the
//! host forwards from the debug adapter. Useful for reproducing reported
//! misbehavior of the interpreter outside an editor.

use std::path::PathBuf;
use std::sync::Arc;

use debugpoints_breakpoint::ONE_TIME_CONDITION;
use debugpoints_config::{CONFIG_SECTION, IGNORE_PATTERNS_KEY, IgnoreList};
use debugpoints_host::memory::MemoryHost;
use debugpoints_host::{BreakpointSpec, DebugMessage, LineColumn, Location, Range};
use debugpoints_session::Interpreter;
use debugpoints_util::{Context, Fallible, bail};
use structopt::StructOpt;
use tokio::sync::mpsc;

#[derive(StructOpt)]
pub struct Options {
    /// Event stream, one JSON message per line.
    file: PathBuf,

    /// Workspace root the ignore patterns are resolved against.
    #[structopt(long, default_value = "/")]
    root: PathBuf,

    /// Ignore pattern, repeatable.
    #[structopt(long = "ignore")]
    ignore: Vec<String>,

    /// One-time breakpoint to seed, as `path:line:protocol-id`. Repeatable.
    #[structopt(long = "one-time")]
    one_time: Vec<String>,
}

impl Options {
    pub async fn main(&self) -> Fallible<()> {
        let host = Arc::new(MemoryHost::new());
        host.add_folder(&self.root);
        host.set_config(CONFIG_SECTION, IGNORE_PATTERNS_KEY, self.ignore.clone());
        for seed in &self.one_time {
            seed_one_time(&host, seed)?;
        }

        let text = std::fs::read_to_string(&self.file)
            .with_context(|| format!("reading {}", self.file.display()))?;
        let messages: Vec<DebugMessage> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).with_context(|| format!("parsing message `{line}`"))
            })
            .collect::<Fallible<_>>()?;
        let count = messages.len();

        let (tx, rx) = mpsc::channel(count.max(1));
        for message in messages {
            tx.send(message).await?;
        }
        drop(tx);

        let ignore_list = IgnoreList::load_shared(&*host);
        Interpreter::new(Arc::clone(&host), ignore_list).run(rx).await;

        println!("replayed {count} message(s)");
        println!("auto-continued {} time(s)", host.continues_issued());
        for id in host.removed_ids() {
            println!("retired {id}");
        }
        Ok(())
    }
}

/// Parses `path:line:protocol-id` and registers the breakpoint.
fn seed_one_time(host: &MemoryHost, seed: &str) -> Fallible<()> {
    let mut parts = seed.rsplitn(3, ':');
    let (Some(protocol_id), Some(line), Some(path)) = (parts.next(), parts.next(), parts.next())
    else {
        bail!("malformed --one-time `{seed}`, expected path:line:protocol-id");
    };
    let line: u32 = line
        .parse()
        .with_context(|| format!("parsing line number in `{seed}`"))?;
    let protocol_id: i64 = protocol_id
        .parse()
        .with_context(|| format!("parsing protocol id in `{seed}`"))?;

    let id = host.seed_breakpoint(
        BreakpointSpec::plain(Location::new(path, Range::at(LineColumn::new(line, 0))))
            .with_condition(ONE_TIME_CONDITION),
    );
    host.bind_protocol_id(&id, protocol_id);
    Ok(())
}
