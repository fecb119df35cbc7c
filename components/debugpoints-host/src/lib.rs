//! Interfaces the breakpoint engine requires from its host platform.
//!
//! The host (an editor with a debug adapter attached) owns the breakpoint
//! store, the active editor, the workspace, configuration, and all UI
//! surfaces. The engine only ever talks to it through the traits below,
//! which keeps every crate in this workspace testable against the
//! [`memory::MemoryHost`] stand-in.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use debugpoints_util::Fallible;
use tokio::sync::mpsc;

mod breakpoint;
mod document;
pub mod memory;
mod message;
mod ui;

pub use breakpoint::{BreakpointId, BreakpointSpec, LineColumn, Location, Range, RawBreakpoint};
pub use document::Document;
pub use message::DebugMessage;
pub use ui::{PickItem, PickerEvent};

/// The host's breakpoint store. Breakpoints are global mutable host state;
/// the engine reads and mutates them only through this interface.
pub trait BreakpointStore {
    /// Every breakpoint currently registered with the host, in host order.
    fn breakpoints(&self) -> Vec<RawBreakpoint>;

    /// Register new breakpoints. The host assigns their identities.
    fn add_breakpoints(&self, breakpoints: Vec<BreakpointSpec>);

    /// Remove breakpoints by identity. Unknown ids are ignored.
    fn remove_breakpoints(&self, ids: &[BreakpointId]);
}

/// The active editor surface.
#[async_trait]
pub trait Editor {
    /// Path of the document in the active editor, if any.
    fn active_file(&self) -> Option<PathBuf>;

    /// Cursor position in the active editor, if any.
    fn cursor(&self) -> Option<LineColumn>;

    async fn open_document(&self, path: &Path) -> Fallible<Document>;

    /// Open `path` (preserving focus) and reveal `position`.
    async fn reveal(&self, path: &Path, position: LineColumn) -> Fallible<()>;
}

/// Workspace folders and file enumeration.
#[async_trait]
pub trait Workspace {
    /// Root folder paths, in host order.
    fn workspace_folders(&self) -> Vec<PathBuf>;

    /// The single-file workspace fallback, if the host is in that mode.
    fn workspace_file(&self) -> Option<PathBuf>;

    async fn find_files(&self, glob: &str) -> Fallible<Vec<PathBuf>>;
}

/// Workspace-scoped configuration.
pub trait ConfigurationStore {
    fn read_string_list(&self, section: &str, key: &str) -> Option<Vec<String>>;

    /// Persist `values`. Failures must be reported to the caller; the
    /// in-memory state it was derived from stays authoritative.
    fn write_string_list(&self, section: &str, key: &str, values: &[String]) -> Fallible<()>;
}

/// The active debug session. There is at most one at a time; the handle is
/// replaced whenever the host starts a new debug adapter.
#[async_trait]
pub trait DebugSession {
    /// Resolve a breakpoint's debug-protocol numeric id. Returns `None`
    /// when the adapter has not (yet) bound the breakpoint.
    async fn resolve_protocol_id(&self, id: &BreakpointId) -> Fallible<Option<i64>>;

    /// Ask the debuggee to continue from a stop.
    async fn continue_execution(&self) -> Fallible<()>;
}

/// Pickers, input boxes, message surfaces, and the ignore-list tree view.
#[async_trait]
pub trait UserInterface {
    async fn input_box(&self, prompt: &str, initial: Option<&str>) -> Fallible<Option<String>>;

    /// Show a cancelable picker over `items`. The returned channel yields
    /// active-item changes until the user accepts or cancels.
    async fn show_picker(&self, items: Vec<PickItem>) -> Fallible<mpsc::Receiver<PickerEvent>>;

    fn show_error(&self, message: &str);

    /// Signal the ignore-list tree view that its data changed.
    fn refresh_ignore_view(&self);
}

/// Everything the engine needs from the host, as one bound.
pub trait Host:
    BreakpointStore
    + Editor
    + Workspace
    + ConfigurationStore
    + DebugSession
    + UserInterface
    + Send
    + Sync
    + 'static
{
}

impl<T> Host for T where
    T: BreakpointStore
        + Editor
        + Workspace
        + ConfigurationStore
        + DebugSession
        + UserInterface
        + Send
        + Sync
        + 'static
{
}
