//! The go-to-breakpoint picker.

use std::path::Path;

use debugpoints_breakpoint::BreakpointRecord;
use debugpoints_engine::scope;
use debugpoints_host::{Host, PickItem, PickerEvent};
use debugpoints_util::vecset::VecSet;
use debugpoints_util::{Fallible, bail};

use crate::{CommandContext, current_path};

/// Shows every workspace breakpoint in a picker; highlighting an entry
/// reveals its location, accepting or canceling dismisses.
pub(crate) async fn list_breakpoints<H: Host>(ctx: CommandContext<H>) -> Fallible<()> {
    let host = &*ctx.host;

    let records = scope::from_workspace(host);
    if records.is_empty() {
        return Ok(());
    }

    // Collapse records that render identically; the display string is the
    // picker's identity.
    let mut seen: VecSet<String> = VecSet::new();
    let mut unique: Vec<BreakpointRecord> = Vec::new();
    for record in records {
        if seen.insert(record.display()) {
            unique.push(record);
        }
    }

    // Breakpoints in the active editor's file come first.
    if let Some(active) = host.active_file() {
        unique.sort_by_key(|record| !record.same_path(&active));
    }

    let base = current_path(host).unwrap_or_default();
    let items: Vec<PickItem> = unique
        .iter()
        .map(|record| PickItem::new(record.display(), describe(record.path(), &base)))
        .collect();

    let mut events = host.show_picker(items.clone()).await?;
    while let Some(event) = events.recv().await {
        match event {
            PickerEvent::ActiveChanged(index) => {
                let Some(item) = items.get(index) else {
                    bail!("picker reported an item out of range: {index}");
                };
                let Some(record) = unique.iter().find(|r| r.display() == item.label) else {
                    bail!("there is no breakpoint with the selected label `{}`", item.label);
                };
                host.reveal(record.path(), record.location().range.start)
                    .await?;
            }
            PickerEvent::Accepted(_) | PickerEvent::Canceled => break,
        }
    }
    Ok(())
}

fn describe(path: &Path, base: &Path) -> String {
    let path = path.to_string_lossy();
    let base = base.to_string_lossy();
    path.strip_prefix(base.as_ref()).unwrap_or(&path).to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use debugpoints_config::IgnoreList;
    use debugpoints_host::memory::MemoryHost;
    use debugpoints_host::{BreakpointSpec, LineColumn, Location, Range};

    use super::*;

    fn context() -> CommandContext<MemoryHost> {
        let host = Arc::new(MemoryHost::new());
        host.add_folder("/root");
        let ignore_list = IgnoreList::load_shared(&*host);
        CommandContext { host, ignore_list }
    }

    fn seed(ctx: &CommandContext<MemoryHost>, path: &str, line: u32) {
        ctx.host
            .seed_breakpoint(BreakpointSpec::plain(Location::new(
                path,
                Range::at(LineColumn::new(line, 0)),
            )));
    }

    #[tokio::test]
    async fn identical_display_strings_collapse_to_one_item() {
        let ctx = context();
        // Same file name, line and column in two directories: same display.
        seed(&ctx, "/root/x/a.ts", 3);
        seed(&ctx, "/root/y/a.ts", 3);
        seed(&ctx, "/root/x/b.ts", 1);
        ctx.host.script_picker(vec![PickerEvent::Canceled]);

        list_breakpoints(ctx.clone()).await.unwrap();

        let shown = ctx.host.pickers_shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].len(), 2);
    }

    #[tokio::test]
    async fn active_file_sorts_first_and_description_strips_the_root() {
        let ctx = context();
        seed(&ctx, "/root/x/a.ts", 3);
        seed(&ctx, "/root/y/b.ts", 5);
        ctx.host.set_active_file("/root/y/b.ts");
        ctx.host.script_picker(vec![PickerEvent::Canceled]);

        list_breakpoints(ctx.clone()).await.unwrap();

        let shown = ctx.host.pickers_shown();
        assert_eq!(shown[0][0].label, "b.ts [5:0]");
        assert_eq!(shown[0][0].description, "/y/b.ts");
    }

    #[tokio::test]
    async fn highlighting_reveals_the_breakpoint_location() {
        let ctx = context();
        seed(&ctx, "/root/x/a.ts", 3);
        ctx.host.script_picker(vec![
            PickerEvent::ActiveChanged(0),
            PickerEvent::Accepted(0),
        ]);

        list_breakpoints(ctx.clone()).await.unwrap();

        assert_eq!(
            ctx.host.revealed(),
            vec![("/root/x/a.ts".into(), LineColumn::new(3, 0))]
        );
    }

    #[tokio::test]
    async fn out_of_range_selection_is_an_internal_error() {
        let ctx = context();
        seed(&ctx, "/root/x/a.ts", 3);
        ctx.host.script_picker(vec![PickerEvent::ActiveChanged(9)]);

        assert!(list_breakpoints(ctx.clone()).await.is_err());
    }

    #[tokio::test]
    async fn no_breakpoints_shows_no_picker() {
        let ctx = context();
        list_breakpoints(ctx.clone()).await.unwrap();
        assert!(ctx.host.pickers_shown().is_empty());
    }
}
