//! Placing conditional breakpoints on assertion call sites.

use debugpoints_host::{BreakpointSpec, Document, Host, Location, Range};
use debugpoints_util::Fallible;
use regex::Regex;

use crate::CommandContext;

/// Matches `assert(condition, "message")` call sites, including
/// `assert.<method>(...)` forms, against lowercased text. Capture 1 is the
/// condition expression, capture 2 the optional message literal.
pub const ASSERT_PATTERN: &str =
    r#"\bassert(?:\.\w+)?\s*\(\s*([^,]+)\s*,\s*(['"][^'"]+['"])?\s*\)"#;

pub(crate) async fn add_on_assert<H: Host>(ctx: CommandContext<H>) -> Fallible<()> {
    let host = &*ctx.host;
    let Some(path) = host.active_file() else {
        return Ok(());
    };
    let document = host.open_document(&path).await?;
    let regex = Regex::new(ASSERT_PATTERN)?;
    place_assert_breakpoints(host, &document, &regex);
    Ok(())
}

pub(crate) async fn project_add_on_assert<H: Host>(ctx: CommandContext<H>) -> Fallible<()> {
    let host = &*ctx.host;
    let regex = Regex::new(ASSERT_PATTERN)?;
    for path in host.find_files("**/*.cs").await? {
        match host.open_document(&path).await {
            Ok(document) => place_assert_breakpoints(host, &document, &regex),
            Err(error) => {
                tracing::warn!(%error, path = %path.display(), "skipping unreadable file");
            }
        }
    }
    Ok(())
}

/// Places one enabled breakpoint per assertion, condition = the asserted
/// expression, log message = the assertion message when present. An
/// existing breakpoint at the same position is replaced.
fn place_assert_breakpoints<H: Host>(host: &H, document: &Document, regex: &Regex) {
    let text = document.text.to_lowercase();
    let same_file = debugpoints_engine::scope::from_file(host, Some(&document.path));

    for caps in regex.captures_iter(&text) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(condition) = caps.get(1) else { continue };

        let position = document.position_at(whole.start());
        if let Some(old) = same_file
            .iter()
            .find(|record| record.location().range.start == position)
        {
            host.remove_breakpoints(&[old.id().clone()]);
        }

        let mut spec =
            BreakpointSpec::plain(Location::new(document.path.clone(), Range::at(position)))
                .with_condition(condition.as_str().trim());
        spec.log_message = caps.get(2).map(|m| m.as_str().to_string());
        host.add_breakpoints(vec![spec]);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use debugpoints_config::IgnoreList;
    use debugpoints_host::LineColumn;
    use debugpoints_host::memory::MemoryHost;

    use super::*;

    fn context() -> CommandContext<MemoryHost> {
        let host = Arc::new(MemoryHost::new());
        host.add_folder("/root");
        let ignore_list = IgnoreList::load_shared(&*host);
        CommandContext { host, ignore_list }
    }

    const SOURCE: &str = "\
var x = compute();
Assert(x > 1, \"x must be positive\");
doWork(x);
Assert.IsTrue(y, \"y holds\")
";

    #[tokio::test]
    async fn places_breakpoints_on_assertions_in_the_active_file() {
        let ctx = context();
        ctx.host.set_active_file("/root/a.cs");
        ctx.host.insert_document("/root/a.cs", SOURCE);

        add_on_assert(ctx.clone()).await.unwrap();

        let added = ctx.host.added_specs();
        assert_eq!(added.len(), 2);

        assert_eq!(added[0].location.range.start, LineColumn::new(1, 0));
        assert_eq!(added[0].condition.as_deref(), Some("x > 1"));
        assert_eq!(
            added[0].log_message.as_deref(),
            Some("\"x must be positive\"")
        );

        assert_eq!(added[1].location.range.start, LineColumn::new(3, 0));
        assert_eq!(added[1].condition.as_deref(), Some("y"));
        assert_eq!(added[1].log_message.as_deref(), Some("\"y holds\""));
    }

    #[tokio::test]
    async fn replaces_an_existing_breakpoint_at_the_same_position() {
        use debugpoints_host::{Location, Range};

        let ctx = context();
        ctx.host.set_active_file("/root/a.cs");
        ctx.host.insert_document("/root/a.cs", SOURCE);
        let old = ctx.host.seed_breakpoint(BreakpointSpec::plain(Location::new(
            "/root/a.cs",
            Range::at(LineColumn::new(1, 0)),
        )));

        add_on_assert(ctx.clone()).await.unwrap();

        assert!(ctx.host.removed_ids().contains(&old));
    }

    #[tokio::test]
    async fn project_scan_covers_every_matching_file() {
        let ctx = context();
        ctx.host
            .insert_document("/root/a.cs", "Assert(a == 1, \"a\");\n");
        ctx.host
            .insert_document("/root/sub/b.cs", "Assert(b == 2, \"b\");\n");
        ctx.host.insert_document("/root/c.ts", "assert(c, \"c\");\n");

        project_add_on_assert(ctx.clone()).await.unwrap();

        let added = ctx.host.added_specs();
        assert_eq!(added.len(), 2);
        assert!(
            added
                .iter()
                .all(|spec| spec.location.path.extension().unwrap() == "cs")
        );
    }

    #[tokio::test]
    async fn no_active_editor_is_a_no_op() {
        let ctx = context();
        add_on_assert(ctx.clone()).await.unwrap();
        assert!(ctx.host.added_specs().is_empty());
    }
}
