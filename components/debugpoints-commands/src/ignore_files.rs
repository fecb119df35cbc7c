//! Managing the ignore-pattern list from the command palette.

use debugpoints_config::IgnoreList;
use debugpoints_host::{Host, PickItem, PickerEvent};
use debugpoints_util::Fallible;

use crate::CommandContext;

pub(crate) async fn add_ignore_file<H: Host>(ctx: CommandContext<H>) -> Fallible<()> {
    let host = &*ctx.host;
    let Some(pattern) = host
        .input_box("File pattern to ignore while debugging", None)
        .await?
    else {
        return Ok(());
    };
    let pattern = pattern.trim().to_string();
    if pattern.is_empty() {
        return Ok(());
    }

    {
        let mut list = ctx.ignore_list.lock().unwrap();
        if !list.add(pattern) {
            return Ok(());
        }
        persist(host, &list);
    }
    host.refresh_ignore_view();
    Ok(())
}

pub(crate) async fn edit_ignore_file<H: Host>(ctx: CommandContext<H>) -> Fallible<()> {
    let host = &*ctx.host;
    let items = tree_items(&ctx);
    if items.is_empty() {
        return Ok(());
    }

    let Some(index) = pick_one(host, items.clone()).await? else {
        return Ok(());
    };
    let Some(item) = items.get(index) else {
        debugpoints_util::bail!("picker reported an item out of range: {index}");
    };

    let Some(new_label) = host.input_box("Edit ignore pattern", Some(&item.label)).await? else {
        return Ok(());
    };
    let new_label = new_label.trim().to_string();
    if new_label.is_empty() {
        return Ok(());
    }

    {
        let mut list = ctx.ignore_list.lock().unwrap();
        list.edit(index, new_label)?;
        persist(host, &list);
    }
    host.refresh_ignore_view();
    Ok(())
}

pub(crate) async fn delete_ignore_file<H: Host>(ctx: CommandContext<H>) -> Fallible<()> {
    let host = &*ctx.host;
    let items = tree_items(&ctx);
    if items.is_empty() {
        return Ok(());
    }

    let Some(index) = pick_one(host, items).await? else {
        return Ok(());
    };

    {
        let mut list = ctx.ignore_list.lock().unwrap();
        list.remove(index)?;
        persist(host, &list);
    }
    host.refresh_ignore_view();
    Ok(())
}

fn tree_items<H: Host>(ctx: &CommandContext<H>) -> Vec<PickItem> {
    ctx.ignore_list
        .lock()
        .unwrap()
        .entries()
        .iter()
        .map(|entry| PickItem::new(entry.label.clone(), entry.tooltip()))
        .collect()
}

/// Waits for the picker to settle on a selection. `None` means canceled.
async fn pick_one<H: Host>(host: &H, items: Vec<PickItem>) -> Fallible<Option<usize>> {
    let mut events = host.show_picker(items).await?;
    while let Some(event) = events.recv().await {
        match event {
            PickerEvent::Accepted(index) => return Ok(Some(index)),
            PickerEvent::Canceled => return Ok(None),
            PickerEvent::ActiveChanged(_) => {}
        }
    }
    Ok(None)
}

/// Persistence failures are surfaced, never swallowed; the in-memory list
/// stays the source of truth for the session either way.
fn persist<H: Host>(host: &H, list: &IgnoreList) {
    if let Err(error) = list.save(host) {
        tracing::error!(%error, "failed to persist ignore patterns");
        host.show_error(&format!("Could not save ignore patterns: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use debugpoints_config::{CONFIG_SECTION, IGNORE_PATTERNS_KEY};
    use debugpoints_host::memory::MemoryHost;

    use super::*;

    fn context_with_patterns(patterns: &[&str]) -> CommandContext<MemoryHost> {
        let host = Arc::new(MemoryHost::new());
        host.set_config(
            CONFIG_SECTION,
            IGNORE_PATTERNS_KEY,
            patterns.iter().map(|s| s.to_string()).collect(),
        );
        let ignore_list = IgnoreList::load_shared(&*host);
        CommandContext { host, ignore_list }
    }

    #[tokio::test]
    async fn add_persists_and_refreshes_the_view() {
        let ctx = context_with_patterns(&[]);
        ctx.host.queue_input(Some("generated/"));

        add_ignore_file(ctx.clone()).await.unwrap();

        assert_eq!(
            ctx.host.stored_config(CONFIG_SECTION, IGNORE_PATTERNS_KEY),
            Some(vec!["generated/".to_string()])
        );
        assert_eq!(ctx.host.ignore_view_refreshes(), 1);
    }

    #[tokio::test]
    async fn dismissed_input_box_is_a_no_op() {
        let ctx = context_with_patterns(&[]);
        ctx.host.queue_input(None);

        add_ignore_file(ctx.clone()).await.unwrap();

        assert!(ctx.ignore_list.lock().unwrap().is_empty());
        assert_eq!(ctx.host.ignore_view_refreshes(), 0);
    }

    #[tokio::test]
    async fn failed_persistence_is_surfaced_but_memory_wins() {
        let ctx = context_with_patterns(&[]);
        ctx.host.fail_config_writes(true);
        ctx.host.queue_input(Some("vendor/"));

        add_ignore_file(ctx.clone()).await.unwrap();

        assert_eq!(ctx.host.errors_shown().len(), 1);
        assert_eq!(
            ctx.ignore_list.lock().unwrap().patterns(),
            vec!["vendor/".to_string()]
        );
    }

    #[tokio::test]
    async fn edit_rewrites_the_selected_entry() {
        let ctx = context_with_patterns(&["a/", "b/"]);
        ctx.host.script_picker(vec![PickerEvent::Accepted(1)]);
        ctx.host.queue_input(Some("c/"));

        edit_ignore_file(ctx.clone()).await.unwrap();

        assert_eq!(
            ctx.host.stored_config(CONFIG_SECTION, IGNORE_PATTERNS_KEY),
            Some(vec!["a/".to_string(), "c/".to_string()])
        );
    }

    #[tokio::test]
    async fn delete_removes_the_selected_entry() {
        let ctx = context_with_patterns(&["a/", "b/"]);
        ctx.host.script_picker(vec![PickerEvent::Accepted(0)]);

        delete_ignore_file(ctx.clone()).await.unwrap();

        assert_eq!(
            ctx.host.stored_config(CONFIG_SECTION, IGNORE_PATTERNS_KEY),
            Some(vec!["b/".to_string()])
        );
        assert_eq!(ctx.host.ignore_view_refreshes(), 1);
    }

    #[tokio::test]
    async fn canceled_picker_changes_nothing() {
        let ctx = context_with_patterns(&["a/"]);
        ctx.host.script_picker(vec![PickerEvent::Canceled]);

        delete_ignore_file(ctx.clone()).await.unwrap();

        assert_eq!(ctx.ignore_list.lock().unwrap().patterns(), vec!["a/"]);
    }
}
