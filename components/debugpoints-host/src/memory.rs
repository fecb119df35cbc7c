//! An in-memory [`Host`](crate::Host) implementation.
//!
//! Used by the unit and integration tests and by the `replay` tool. State
//! is scripted up front (documents, breakpoints, picker interactions,
//! input-box answers) and every mutation the engine performs is recorded
//! so tests can assert on exactly what the host was asked to do.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use debugpoints_util::{Fallible, bail};
use globset::Glob;
use tokio::sync::mpsc;

use crate::{
    BreakpointId, BreakpointSpec, BreakpointStore, ConfigurationStore, DebugSession, Document,
    Editor, LineColumn, PickItem, PickerEvent, RawBreakpoint, UserInterface, Workspace,
};

#[derive(Default)]
pub struct MemoryHost {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    breakpoints: Vec<RawBreakpoint>,
    protocol_ids: HashMap<BreakpointId, i64>,

    folders: Vec<PathBuf>,
    workspace_file: Option<PathBuf>,
    active_file: Option<PathBuf>,
    cursor: Option<LineColumn>,
    documents: HashMap<PathBuf, String>,

    config: HashMap<(String, String), Vec<String>>,
    fail_config_writes: bool,

    input_answers: VecDeque<Option<String>>,
    picker_script: VecDeque<Vec<PickerEvent>>,

    removed: Vec<BreakpointId>,
    added: Vec<BreakpointSpec>,
    continues: usize,
    revealed: Vec<(PathBuf, LineColumn)>,
    picker_items: Vec<Vec<PickItem>>,
    errors: Vec<String>,
    ignore_view_refreshes: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    // -- scripting ---------------------------------------------------------

    pub fn add_folder(&self, path: impl Into<PathBuf>) {
        self.inner.lock().unwrap().folders.push(path.into());
    }

    pub fn set_workspace_file(&self, path: impl Into<PathBuf>) {
        self.inner.lock().unwrap().workspace_file = Some(path.into());
    }

    pub fn set_active_file(&self, path: impl Into<PathBuf>) {
        self.inner.lock().unwrap().active_file = Some(path.into());
    }

    pub fn set_cursor(&self, position: LineColumn) {
        self.inner.lock().unwrap().cursor = Some(position);
    }

    pub fn insert_document(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.inner
            .lock()
            .unwrap()
            .documents
            .insert(path.into(), text.into());
    }

    /// Register a breakpoint as if the user had placed it, returning the
    /// identity the host assigned.
    pub fn seed_breakpoint(&self, spec: BreakpointSpec) -> BreakpointId {
        let mut inner = self.inner.lock().unwrap();
        inner.create(spec)
    }

    /// Bind a breakpoint to a debug-protocol id, as the adapter would.
    pub fn bind_protocol_id(&self, id: &BreakpointId, protocol_id: i64) {
        self.inner
            .lock()
            .unwrap()
            .protocol_ids
            .insert(id.clone(), protocol_id);
    }

    pub fn set_config(&self, section: &str, key: &str, values: Vec<String>) {
        self.inner
            .lock()
            .unwrap()
            .config
            .insert((section.to_string(), key.to_string()), values);
    }

    pub fn fail_config_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_config_writes = fail;
    }

    pub fn queue_input(&self, answer: Option<&str>) {
        self.inner
            .lock()
            .unwrap()
            .input_answers
            .push_back(answer.map(str::to_string));
    }

    /// Script the interaction for the next picker shown.
    pub fn script_picker(&self, events: Vec<PickerEvent>) {
        self.inner.lock().unwrap().picker_script.push_back(events);
    }

    // -- recorded effects --------------------------------------------------

    pub fn removed_ids(&self) -> Vec<BreakpointId> {
        self.inner.lock().unwrap().removed.clone()
    }

    pub fn added_specs(&self) -> Vec<BreakpointSpec> {
        self.inner.lock().unwrap().added.clone()
    }

    pub fn continues_issued(&self) -> usize {
        self.inner.lock().unwrap().continues
    }

    pub fn revealed(&self) -> Vec<(PathBuf, LineColumn)> {
        self.inner.lock().unwrap().revealed.clone()
    }

    pub fn pickers_shown(&self) -> Vec<Vec<PickItem>> {
        self.inner.lock().unwrap().picker_items.clone()
    }

    pub fn errors_shown(&self) -> Vec<String> {
        self.inner.lock().unwrap().errors.clone()
    }

    pub fn ignore_view_refreshes(&self) -> usize {
        self.inner.lock().unwrap().ignore_view_refreshes
    }

    pub fn stored_config(&self, section: &str, key: &str) -> Option<Vec<String>> {
        self.inner
            .lock()
            .unwrap()
            .config
            .get(&(section.to_string(), key.to_string()))
            .cloned()
    }
}

impl Inner {
    fn create(&mut self, spec: BreakpointSpec) -> BreakpointId {
        self.next_id += 1;
        let id = format!("bp-{}", self.next_id);
        self.breakpoints.push(RawBreakpoint {
            id: id.clone(),
            enabled: spec.enabled,
            condition: spec.condition,
            hit_condition: spec.hit_condition,
            log_message: spec.log_message,
            location: spec.location,
        });
        id
    }
}

impl BreakpointStore for MemoryHost {
    fn breakpoints(&self) -> Vec<RawBreakpoint> {
        self.inner.lock().unwrap().breakpoints.clone()
    }

    fn add_breakpoints(&self, breakpoints: Vec<BreakpointSpec>) {
        let mut inner = self.inner.lock().unwrap();
        for spec in breakpoints {
            inner.added.push(spec.clone());
            inner.create(spec);
        }
    }

    fn remove_breakpoints(&self, ids: &[BreakpointId]) {
        let mut inner = self.inner.lock().unwrap();
        for id in ids {
            inner.removed.push(id.clone());
            inner.breakpoints.retain(|b| &b.id != id);
            inner.protocol_ids.remove(id);
        }
    }
}

#[async_trait]
impl Editor for MemoryHost {
    fn active_file(&self) -> Option<PathBuf> {
        self.inner.lock().unwrap().active_file.clone()
    }

    fn cursor(&self) -> Option<LineColumn> {
        self.inner.lock().unwrap().cursor
    }

    async fn open_document(&self, path: &Path) -> Fallible<Document> {
        let inner = self.inner.lock().unwrap();
        match inner.documents.get(path) {
            Some(text) => Ok(Document::new(path, text.clone())),
            None => bail!("no document at {}", path.display()),
        }
    }

    async fn reveal(&self, path: &Path, position: LineColumn) -> Fallible<()> {
        self.inner
            .lock()
            .unwrap()
            .revealed
            .push((path.to_path_buf(), position));
        Ok(())
    }
}

#[async_trait]
impl Workspace for MemoryHost {
    fn workspace_folders(&self) -> Vec<PathBuf> {
        self.inner.lock().unwrap().folders.clone()
    }

    fn workspace_file(&self) -> Option<PathBuf> {
        self.inner.lock().unwrap().workspace_file.clone()
    }

    async fn find_files(&self, glob: &str) -> Fallible<Vec<PathBuf>> {
        let matcher = Glob::new(glob)?.compile_matcher();
        let inner = self.inner.lock().unwrap();
        let mut paths: Vec<PathBuf> = inner
            .documents
            .keys()
            .filter(|p| matcher.is_match(p))
            .cloned()
            .collect();
        paths.sort();
        Ok(paths)
    }
}

impl ConfigurationStore for MemoryHost {
    fn read_string_list(&self, section: &str, key: &str) -> Option<Vec<String>> {
        self.inner
            .lock()
            .unwrap()
            .config
            .get(&(section.to_string(), key.to_string()))
            .cloned()
    }

    fn write_string_list(&self, section: &str, key: &str, values: &[String]) -> Fallible<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_config_writes {
            bail!("configuration store is read-only");
        }
        inner.config.insert(
            (section.to_string(), key.to_string()),
            values.to_vec(),
        );
        Ok(())
    }
}

#[async_trait]
impl DebugSession for MemoryHost {
    async fn resolve_protocol_id(&self, id: &BreakpointId) -> Fallible<Option<i64>> {
        Ok(self.inner.lock().unwrap().protocol_ids.get(id).copied())
    }

    async fn continue_execution(&self) -> Fallible<()> {
        self.inner.lock().unwrap().continues += 1;
        Ok(())
    }
}

#[async_trait]
impl UserInterface for MemoryHost {
    async fn input_box(&self, _prompt: &str, _initial: Option<&str>) -> Fallible<Option<String>> {
        let answer = self.inner.lock().unwrap().input_answers.pop_front();
        Ok(answer.flatten())
    }

    async fn show_picker(&self, items: Vec<PickItem>) -> Fallible<mpsc::Receiver<PickerEvent>> {
        let script = {
            let mut inner = self.inner.lock().unwrap();
            inner.picker_items.push(items);
            inner
                .picker_script
                .pop_front()
                .unwrap_or_else(|| vec![PickerEvent::Canceled])
        };
        let (tx, rx) = mpsc::channel(script.len().max(1));
        for event in script {
            tx.send(event).await.ok();
        }
        Ok(rx)
    }

    fn show_error(&self, message: &str) {
        self.inner.lock().unwrap().errors.push(message.to_string());
    }

    fn refresh_ignore_view(&self) {
        self.inner.lock().unwrap().ignore_view_refreshes += 1;
    }
}
