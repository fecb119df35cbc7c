//! Resolving the set of breakpoints a command operates on.

use std::path::{Path, PathBuf};

use debugpoints_breakpoint::BreakpointRecord;
use debugpoints_host::Host;

/// Breakpoints in a single file, resolved in priority order: the explicit
/// `path` argument, else the active editor's document, else the
/// single-file workspace fallback. With nothing to resolve against the set
/// is empty; that is a routine user state, not an error.
pub fn from_file<H: Host>(host: &H, path: Option<&Path>) -> Vec<BreakpointRecord> {
    let resolved: Option<PathBuf> = path
        .map(Path::to_path_buf)
        .or_else(|| host.active_file())
        .or_else(|| host.workspace_file());

    let Some(resolved) = resolved else {
        return Vec::new();
    };

    host.breakpoints()
        .into_iter()
        .map(BreakpointRecord::from)
        .filter(|record| record.same_path(&resolved))
        .collect()
}

/// Breakpoints whose path equals or lies under any workspace root.
pub fn from_workspace<H: Host>(host: &H) -> Vec<BreakpointRecord> {
    let folders = host.workspace_folders();
    host.breakpoints()
        .into_iter()
        .map(BreakpointRecord::from)
        .filter(|record| folders.iter().any(|root| record.in_workspace(root)))
        .collect()
}

#[cfg(test)]
mod tests {
    use debugpoints_host::memory::MemoryHost;
    use debugpoints_host::{BreakpointSpec, LineColumn, Location, Range};

    use super::*;

    fn seed(host: &MemoryHost, path: &str, line: u32) {
        host.seed_breakpoint(BreakpointSpec::plain(Location::new(
            path,
            Range::at(LineColumn::new(line, 0)),
        )));
    }

    #[test]
    fn workspace_scope_keeps_only_paths_under_a_root() {
        let host = MemoryHost::new();
        host.add_folder("/root");
        seed(&host, "/root/a.ts", 1);
        seed(&host, "/other/b.ts", 2);

        let records = from_workspace(&host);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path(), Path::new("/root/a.ts"));
    }

    #[test]
    fn file_scope_prefers_explicit_path_over_active_editor() {
        let host = MemoryHost::new();
        host.set_active_file("/root/b.ts");
        seed(&host, "/root/a.ts", 1);
        seed(&host, "/root/b.ts", 2);

        let explicit = from_file(&host, Some(Path::new("/root/a.ts")));
        assert_eq!(explicit.len(), 1);
        assert_eq!(explicit[0].path(), Path::new("/root/a.ts"));

        let from_editor = from_file(&host, None);
        assert_eq!(from_editor.len(), 1);
        assert_eq!(from_editor[0].path(), Path::new("/root/b.ts"));
    }

    #[test]
    fn file_scope_without_any_context_is_empty() {
        let host = MemoryHost::new();
        seed(&host, "/root/a.ts", 1);
        assert!(from_file(&host, None).is_empty());
    }

    #[test]
    fn file_scope_falls_back_to_workspace_file() {
        let host = MemoryHost::new();
        host.set_workspace_file("/root/a.ts");
        seed(&host, "/root/a.ts", 1);
        assert_eq!(from_file(&host, None).len(), 1);
    }
}
