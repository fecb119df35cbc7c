//! The debug-event interpreter.
//!
//! Consumes the ordered message stream of the active debug session and
//! derives two reactions from every stop: retiring one-time breakpoints
//! whose protocol id appears among the hit ids, and auto-continuing when
//! the stopped file matches a user ignore pattern. Each inbound message is
//! processed to completion before the next one is taken, so the ordering
//! the host guarantees for a single session is preserved.

use std::path::Path;
use std::sync::Arc;

use debugpoints_breakpoint::relative_to_root;
use debugpoints_config::SharedIgnoreList;
use debugpoints_engine::{ignore, scope};
use debugpoints_host::{DebugMessage, Host};
use debugpoints_util::Fallible;
use tokio::sync::mpsc;

/// Where the interpreter believes the debuggee is. `Running` is assumed
/// before any event is observed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The `stopped` event's `hitBreakpointIds` was not an array of
    /// numbers. Terminal to that one event; the session continues.
    #[error("stopped event carried a malformed hitBreakpointIds payload: {0}")]
    MalformedHitIds(serde_json::Value),
}

/// Interpreter for one debug session's message stream. A new session gets
/// a fresh interpreter; the extension aborts the previous one when it
/// attaches a replacement.
pub struct Interpreter<H: Host> {
    host: Arc<H>,
    ignore_list: SharedIgnoreList,
    state: RunState,
    last_hit_ids: Vec<i64>,
}

impl<H: Host> Interpreter<H> {
    pub fn new(host: Arc<H>, ignore_list: SharedIgnoreList) -> Self {
        Self {
            host,
            ignore_list,
            state: RunState::Running,
            last_hit_ids: Vec::new(),
        }
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// Hit ids captured by the most recent breakpoint stop.
    pub fn last_hit_ids(&self) -> &[i64] {
        &self.last_hit_ids
    }

    /// Drains the stream until it closes.
    pub async fn run(mut self, mut messages: mpsc::Receiver<DebugMessage>) {
        while let Some(message) = messages.recv().await {
            self.handle(message).await;
        }
    }

    /// Handles one message. A handler failure is reported and terminal to
    /// that message only.
    pub async fn handle(&mut self, message: DebugMessage) {
        if let Err(error) = self.dispatch(message).await {
            tracing::error!(%error, "debug event handler failed");
        }
    }

    async fn dispatch(&mut self, message: DebugMessage) -> Fallible<()> {
        match message {
            DebugMessage::Continued => {
                self.state = RunState::Running;
                Ok(())
            }
            DebugMessage::Stopped {
                reason,
                hit_breakpoint_ids,
                source,
            } => {
                self.on_stopped(&reason, hit_breakpoint_ids, source.as_deref())
                    .await
            }
            DebugMessage::StackTrace { top_source } => {
                // Hosts that cannot annotate `stopped` with a source report
                // the stopped location through the stack-trace response.
                if self.state == RunState::Stopped {
                    if let Some(source) = top_source.as_deref() {
                        self.auto_continue_check(source).await?;
                    }
                }
                Ok(())
            }
            // Alternate hit-detection signal used by an earlier build;
            // parsed but not acted on here.
            DebugMessage::BreakpointChanged { .. } => Ok(()),
        }
    }

    async fn on_stopped(
        &mut self,
        reason: &str,
        hit_breakpoint_ids: Option<serde_json::Value>,
        source: Option<&Path>,
    ) -> Fallible<()> {
        self.state = RunState::Stopped;

        // The ignore check and the one-time cleanup are independent
        // reactions to the same stop; a failure in one must not starve the
        // other.
        if let Some(source) = source {
            if let Err(error) = self.auto_continue_check(source).await {
                tracing::error!(%error, "auto-continue check failed");
            }
        }

        if reason == "breakpoint" {
            let hit_ids = parse_hit_ids(hit_breakpoint_ids)?;
            self.last_hit_ids = hit_ids.clone();
            self.retire_one_time_breakpoints(&hit_ids).await;
        }

        Ok(())
    }

    /// Continues past the stop when the stopped file matches an ignore
    /// pattern.
    async fn auto_continue_check(&mut self, source: &Path) -> Fallible<()> {
        let patterns = self.ignore_list.lock().unwrap().patterns();
        if patterns.is_empty() {
            return Ok(());
        }
        let Some(root) = self.host.workspace_folders().into_iter().next() else {
            return Ok(());
        };

        let relative = relative_to_root(source, &root);
        if ignore::matches(&relative, &patterns) {
            tracing::debug!(path = %relative, "stopped in an ignored file, continuing");
            self.host.continue_execution().await?;
            self.state = RunState::Running;
        }
        Ok(())
    }

    /// Removes every one-time breakpoint whose protocol id is in `hit_ids`.
    ///
    /// Resolutions run concurrently, one pending lookup per breakpoint;
    /// completion order is unspecified and removal is idempotent, so a
    /// stale resolution from a superseded stop cannot do harm.
    async fn retire_one_time_breakpoints(&mut self, hit_ids: &[i64]) {
        let records = scope::from_workspace(&*self.host);

        let resolutions = futures::future::join_all(records.iter().map(|record| {
            let host = Arc::clone(&self.host);
            async move { (record, host.resolve_protocol_id(record.id()).await) }
        }))
        .await;

        for (record, resolved) in resolutions {
            let protocol_id = match resolved {
                Ok(Some(id)) => id,
                Ok(None) => continue,
                Err(error) => {
                    tracing::warn!(%error, breakpoint = %record.id(), "protocol id resolution failed");
                    continue;
                }
            };
            if hit_ids.contains(&protocol_id) && record.is_one_time() {
                tracing::debug!(breakpoint = %record.id(), "retiring one-time breakpoint");
                self.host.remove_breakpoints(&[record.id().clone()]);
            }
        }
    }
}

fn parse_hit_ids(value: Option<serde_json::Value>) -> Result<Vec<i64>, EventError> {
    let value = value.unwrap_or(serde_json::Value::Null);
    let Some(items) = value.as_array() else {
        return Err(EventError::MalformedHitIds(value));
    };
    items
        .iter()
        .map(|item| item.as_i64().ok_or(()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|()| EventError::MalformedHitIds(value.clone()))
}
