//! The generated management commands: every (operation, category, scope)
//! combination as a named command over the bulk-action engine.

use debugpoints_engine::{BulkAction, Category, Operation, Scope};
use debugpoints_host::Host;

use crate::{CommandContext, CommandRegistry, command_name};

pub(crate) fn register<H: Host>(registry: &mut CommandRegistry<H>) {
    for scope in Scope::ALL {
        for category in Category::ALL_CATEGORIES {
            for operation in Operation::ALL {
                let name = command_name(&format!(
                    "{}.{}.{}",
                    operation.as_str(),
                    category.as_str(),
                    scope.as_str()
                ));
                registry.register(name, move |ctx| {
                    Box::pin(async move {
                        run(&ctx, scope, category, operation);
                        Ok(())
                    })
                });
            }
        }
    }
}

fn run<H: Host>(
    ctx: &CommandContext<H>,
    scope: Scope,
    category: Category,
    operation: Operation,
) {
    BulkAction::new(&*ctx.host)
        .scope(scope)
        .category(category)
        .operation(operation)
        .run();
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use debugpoints_config::IgnoreList;
    use debugpoints_host::memory::MemoryHost;
    use debugpoints_host::{BreakpointSpec, LineColumn, Location, Range};

    use crate::register_all;

    use super::*;

    fn context() -> CommandContext<MemoryHost> {
        let host = Arc::new(MemoryHost::new());
        host.add_folder("/root");
        let ignore_list = IgnoreList::load_shared(&*host);
        CommandContext { host, ignore_list }
    }

    #[tokio::test]
    async fn remove_logpoints_in_workspace() {
        let ctx = context();
        ctx.host.seed_breakpoint(BreakpointSpec::plain(Location::new(
            "/root/a.ts",
            Range::at(LineColumn::new(0, 0)),
        )));
        ctx.host.seed_breakpoint(
            BreakpointSpec::plain(Location::new("/root/b.ts", Range::at(LineColumn::new(1, 0))))
                .with_log_message("x is {x}"),
        );

        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        registry
            .invoke("debugpoints.remove.logpoints.workspace", &ctx)
            .await
            .unwrap();

        assert_eq!(ctx.host.removed_ids(), vec!["bp-2".to_string()]);
    }

    #[tokio::test]
    async fn disable_all_in_file_uses_the_active_editor() {
        let ctx = context();
        ctx.host.set_active_file("/root/a.ts");
        ctx.host.seed_breakpoint(BreakpointSpec::plain(Location::new(
            "/root/a.ts",
            Range::at(LineColumn::new(0, 0)),
        )));
        ctx.host.seed_breakpoint(BreakpointSpec::plain(Location::new(
            "/root/b.ts",
            Range::at(LineColumn::new(0, 0)),
        )));

        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        registry
            .invoke("debugpoints.disable.all.file", &ctx)
            .await
            .unwrap();

        assert_eq!(ctx.host.removed_ids(), vec!["bp-1".to_string()]);
        let added = ctx.host.added_specs();
        assert_eq!(added.len(), 1);
        assert!(!added[0].enabled);
    }
}
