use std::path::Path;

use debugpoints_host::{BreakpointId, BreakpointSpec, Location, RawBreakpoint};

use crate::paths::normalize_path;

/// The always-true sentinel condition marking a one-time breakpoint: it
/// never suppresses the stop, it only tags the breakpoint so the event
/// interpreter deletes it after the first hit.
pub const ONE_TIME_CONDITION: &str = "true && 1 == 1";

/// A host breakpoint plus its derived classification.
///
/// Classification is a pure function of the raw attributes; nothing is
/// stored, so the categories log / conditional / hit-condition / plain
/// stay mutually exclusive by construction. `is_one_time` refines
/// `is_conditional`.
///
/// Records are transient: wrap the host's breakpoints on each query, use,
/// drop.
#[derive(Clone, Debug)]
pub struct BreakpointRecord {
    raw: RawBreakpoint,
}

impl From<RawBreakpoint> for BreakpointRecord {
    fn from(raw: RawBreakpoint) -> Self {
        Self { raw }
    }
}

impl BreakpointRecord {
    pub fn id(&self) -> &BreakpointId {
        &self.raw.id
    }

    pub fn enabled(&self) -> bool {
        self.raw.enabled
    }

    pub fn condition(&self) -> Option<&str> {
        self.raw.condition.as_deref()
    }

    pub fn hit_condition(&self) -> Option<&str> {
        self.raw.hit_condition.as_deref()
    }

    pub fn log_message(&self) -> Option<&str> {
        self.raw.log_message.as_deref()
    }

    pub fn location(&self) -> &Location {
        &self.raw.location
    }

    pub fn path(&self) -> &Path {
        &self.raw.location.path
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path().file_name().and_then(|n| n.to_str())
    }

    // -- classification ----------------------------------------------------

    pub fn is_log(&self) -> bool {
        self.raw.log_message.is_some()
    }

    pub fn is_conditional(&self) -> bool {
        self.raw.condition.is_some()
    }

    pub fn is_hit_condition(&self) -> bool {
        self.raw.hit_condition.is_some()
    }

    pub fn is_plain(&self) -> bool {
        !self.is_log() && !self.is_conditional() && !self.is_hit_condition()
    }

    pub fn is_one_time(&self) -> bool {
        self.raw.condition.as_deref() == Some(ONE_TIME_CONDITION)
    }

    // -- scope -------------------------------------------------------------

    /// True if this breakpoint's path equals or lies under `root`.
    pub fn in_workspace(&self, root: &Path) -> bool {
        let path = normalize_path(self.path());
        let root = normalize_path(root);
        path == root || path.starts_with(&root)
    }

    pub fn same_path(&self, path: &Path) -> bool {
        normalize_path(self.path()) == normalize_path(path)
    }

    // -- display -----------------------------------------------------------

    /// The display string used in pickers. Two records with equal display
    /// strings are treated as the same breakpoint for deduplication.
    pub fn display(&self) -> String {
        let start = self.raw.location.range.start;

        if let Some(log_message) = self.log_message() {
            return format!("{} [{}:{}]", log_message, start.line, start.character);
        }
        if let Some(file_name) = self.file_name() {
            return format!("{} [{}:{}]", file_name, start.line, start.character);
        }
        self.raw.id.clone()
    }

    /// A spec reproducing this breakpoint's location and attributes with a
    /// different enabled flag. Used by the enable/disable replace cycle.
    pub fn respec(&self, enabled: bool) -> BreakpointSpec {
        BreakpointSpec {
            enabled,
            condition: self.raw.condition.clone(),
            hit_condition: self.raw.hit_condition.clone(),
            log_message: self.raw.log_message.clone(),
            location: self.raw.location.clone(),
        }
    }
}

/// Dedup identity is the display string, a deliberate approximation the
/// go-to-breakpoint picker relies on.
impl PartialEq for BreakpointRecord {
    fn eq(&self, other: &Self) -> bool {
        self.display() == other.display()
    }
}

impl Eq for BreakpointRecord {}
