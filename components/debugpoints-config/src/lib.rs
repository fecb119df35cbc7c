//! Configuration access and the ignore-list state backing the tree view.

use std::sync::{Arc, Mutex};

use debugpoints_host::ConfigurationStore;
use debugpoints_util::{Fallible, bail};

/// Configuration namespace, kept from the original extension.
pub const CONFIG_SECTION: &str = "betterbreakpoints";
/// Workspace-scoped key holding the ordered ignore-pattern list.
pub const IGNORE_PATTERNS_KEY: &str = "ignoreFilePatterns";

/// Typed view over the extension's configuration namespace.
pub struct Config<'h, H: ConfigurationStore> {
    host: &'h H,
}

impl<'h, H: ConfigurationStore> Config<'h, H> {
    pub fn new(host: &'h H) -> Self {
        Self { host }
    }

    /// The persisted ignore-pattern list; missing configuration reads as
    /// an empty list.
    pub fn ignore_patterns(&self) -> Vec<String> {
        self.host
            .read_string_list(CONFIG_SECTION, IGNORE_PATTERNS_KEY)
            .unwrap_or_default()
    }

    pub fn update_ignore_patterns(&self, patterns: &[String]) -> Fallible<()> {
        self.host
            .write_string_list(CONFIG_SECTION, IGNORE_PATTERNS_KEY, patterns)
    }
}

/// One user-defined ignore pattern, as shown in the tree view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoreEntry {
    pub label: String,
}

impl IgnoreEntry {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn tooltip(&self) -> String {
        self.label.clone()
    }
}

/// The ordered ignore-entry list, unique by exact label.
///
/// Mutations update memory first and then persist; when persistence fails
/// the caller surfaces the error and the in-memory list stays the source
/// of truth for the session.
#[derive(Default)]
pub struct IgnoreList {
    entries: Vec<IgnoreEntry>,
}

/// The list is shared between the command handlers, the event interpreter
/// and the tree view; everything runs on one cooperative loop but the
/// handle still needs interior mutability.
pub type SharedIgnoreList = Arc<Mutex<IgnoreList>>;

impl IgnoreList {
    pub fn load<H: ConfigurationStore>(host: &H) -> Self {
        let mut list = Self::default();
        list.reload(host);
        list
    }

    pub fn load_shared<H: ConfigurationStore>(host: &H) -> SharedIgnoreList {
        Arc::new(Mutex::new(Self::load(host)))
    }

    /// Replaces the in-memory entries with the persisted configuration.
    pub fn reload<H: ConfigurationStore>(&mut self, host: &H) {
        self.entries = Config::new(host)
            .ignore_patterns()
            .into_iter()
            .map(IgnoreEntry::new)
            .collect();
    }

    pub fn entries(&self) -> &[IgnoreEntry] {
        &self.entries
    }

    pub fn patterns(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.label.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a pattern. Returns false (without modification) when an
    /// entry with the same label already exists.
    pub fn add(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.entries.iter().any(|e| e.label == label) {
            return false;
        }
        self.entries.push(IgnoreEntry::new(label));
        true
    }

    pub fn edit(&mut self, index: usize, label: impl Into<String>) -> Fallible<()> {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.label = label.into();
                Ok(())
            }
            None => bail!("no ignore entry at index {index}"),
        }
    }

    pub fn remove(&mut self, index: usize) -> Fallible<IgnoreEntry> {
        if index >= self.entries.len() {
            bail!("no ignore entry at index {index}");
        }
        Ok(self.entries.remove(index))
    }

    /// Persists the current entries. The in-memory list is already updated
    /// by the time this runs; a failure here leaves it authoritative.
    pub fn save<H: ConfigurationStore>(&self, host: &H) -> Fallible<()> {
        Config::new(host).update_ignore_patterns(&self.patterns())
    }
}
