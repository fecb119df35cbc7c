use std::path::PathBuf;

/// Opaque breakpoint identity assigned by the host. Valid only as long as
/// the host's underlying breakpoint exists.
pub type BreakpointId = String;

/// Zero-based line/character position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineColumn {
    pub line: u32,
    pub character: u32,
}

impl LineColumn {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: LineColumn,
    pub end: LineColumn,
}

impl Range {
    pub fn new(start: LineColumn, end: LineColumn) -> Self {
        Self { start, end }
    }

    /// A zero-width range at `position`.
    pub fn at(position: LineColumn) -> Self {
        Self::new(position, position)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub path: PathBuf,
    pub range: Range,
}

impl Location {
    pub fn new(path: impl Into<PathBuf>, range: Range) -> Self {
        Self {
            path: path.into(),
            range,
        }
    }
}

/// A breakpoint as the host reports it. The classification logic lives in
/// `debugpoints-breakpoint`; this is just the raw handle.
#[derive(Clone, Debug)]
pub struct RawBreakpoint {
    pub id: BreakpointId,
    pub enabled: bool,
    pub condition: Option<String>,
    pub hit_condition: Option<String>,
    pub log_message: Option<String>,
    pub location: Location,
}

/// A breakpoint to be created. The host assigns the identity on add.
#[derive(Clone, Debug)]
pub struct BreakpointSpec {
    pub enabled: bool,
    pub condition: Option<String>,
    pub hit_condition: Option<String>,
    pub log_message: Option<String>,
    pub location: Location,
}

impl BreakpointSpec {
    /// A plain enabled breakpoint at `location`.
    pub fn plain(location: Location) -> Self {
        Self {
            enabled: true,
            condition: None,
            hit_condition: None,
            log_message: None,
            location,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_log_message(mut self, log_message: impl Into<String>) -> Self {
        self.log_message = Some(log_message.into());
        self
    }
}
