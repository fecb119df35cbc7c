//! Toggling a one-time breakpoint at the cursor.

use debugpoints_breakpoint::ONE_TIME_CONDITION;
use debugpoints_engine::scope;
use debugpoints_host::{BreakpointSpec, Host, Location, Range};
use debugpoints_util::Fallible;

use crate::CommandContext;

/// Without an active editor this is a silent no-op, not an error.
pub(crate) async fn add_triggered<H: Host>(ctx: CommandContext<H>) -> Fallible<()> {
    let host = &*ctx.host;
    let (Some(path), Some(cursor)) = (host.active_file(), host.cursor()) else {
        return Ok(());
    };

    let same_line: Vec<_> = scope::from_file(host, Some(&path))
        .into_iter()
        .filter(|record| {
            record.location().range.start.line == cursor.line && record.is_one_time()
        })
        .collect();

    if same_line.is_empty() {
        host.add_breakpoints(vec![
            BreakpointSpec::plain(Location::new(path, Range::at(cursor)))
                .with_condition(ONE_TIME_CONDITION),
        ]);
    } else {
        let ids: Vec<_> = same_line.iter().map(|record| record.id().clone()).collect();
        host.remove_breakpoints(&ids);
    }
    Ok(())
}
