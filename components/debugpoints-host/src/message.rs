use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A message observed on the active debug adapter's stream, reduced to the
/// shapes the interpreter cares about.
///
/// `Stopped` carries the raw `hitBreakpointIds` payload unvalidated; the
/// protocol does not guarantee it is a numeric array and the interpreter
/// treats a malformed value as an error of that one event, not of the
/// session.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DebugMessage {
    #[serde(rename_all = "camelCase")]
    Stopped {
        reason: String,
        #[serde(default)]
        hit_breakpoint_ids: Option<serde_json::Value>,
        /// Stopped location, when the host's tracker annotates it.
        #[serde(default)]
        source: Option<PathBuf>,
    },
    Continued,
    /// A stack-trace response seen on the stream. Hosts that do not
    /// annotate `Stopped` with a source deliver the stopped location this
    /// way instead.
    #[serde(rename_all = "camelCase")]
    StackTrace { top_source: Option<PathBuf> },
    /// A breakpoint-changed event. An earlier build used this as an
    /// alternate hit-detection signal; it is parsed but not acted on.
    #[serde(rename_all = "camelCase")]
    BreakpointChanged {
        reason: String,
        #[serde(default)]
        id: Option<i64>,
    },
}
