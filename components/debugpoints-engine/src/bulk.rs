//! The bulk-action engine: a (getter, filter, action) triple executed over
//! the resolved breakpoint set.

use debugpoints_breakpoint::BreakpointRecord;
use debugpoints_host::Host;

use crate::scope;

/// Which breakpoints a bulk action targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    File,
    Workspace,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::File, Scope::Workspace];

    pub fn resolve<H: Host>(self, host: &H) -> Vec<BreakpointRecord> {
        match self {
            Scope::File => scope::from_file(host, None),
            Scope::Workspace => scope::from_workspace(host),
        }
    }

    /// Command-name segment.
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::File => "file",
            Scope::Workspace => "workspace",
        }
    }
}

/// Breakpoint category filters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Category {
    All,
    Plain,
    Conditional,
    HitCondition,
    Log,
    OneTime,
}

impl Category {
    pub const ALL_CATEGORIES: [Category; 6] = [
        Category::All,
        Category::Plain,
        Category::Conditional,
        Category::HitCondition,
        Category::Log,
        Category::OneTime,
    ];

    pub fn selects(self, record: &BreakpointRecord) -> bool {
        match self {
            Category::All => true,
            Category::Plain => record.is_plain(),
            Category::Conditional => record.is_conditional(),
            Category::HitCondition => record.is_hit_condition(),
            Category::Log => record.is_log(),
            Category::OneTime => record.is_one_time(),
        }
    }

    /// Command-name segment, preserving the extension's historical names.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Plain => "breakpoints",
            Category::Conditional => "conditionals",
            Category::HitCondition => "hitConditionals",
            Category::Log => "logpoints",
            Category::OneTime => "oneTime",
        }
    }
}

/// State transitions a bulk action can apply.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Remove,
    Enable,
    Disable,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Remove, Operation::Enable, Operation::Disable];

    /// Applies this operation to one breakpoint.
    ///
    /// Enable and disable are a remove followed by an add of a spec with
    /// the same location and attributes and the new enabled flag: the host
    /// model has no in-place mutation, so a concurrent query can observe
    /// the breakpoint momentarily absent. That window is accepted.
    pub fn apply<H: Host>(self, host: &H, record: &BreakpointRecord) {
        match self {
            Operation::Remove => host.remove_breakpoints(&[record.id().clone()]),
            Operation::Enable => replace(host, record, true),
            Operation::Disable => replace(host, record, false),
        }
    }

    /// Command-name segment.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Remove => "remove",
            Operation::Enable => "enable",
            Operation::Disable => "disable",
        }
    }
}

fn replace<H: Host>(host: &H, record: &BreakpointRecord, enabled: bool) {
    host.remove_breakpoints(&[record.id().clone()]);
    host.add_breakpoints(vec![record.respec(enabled)]);
}

/// A composable bulk action over the host's breakpoints.
///
/// The three parts are set independently; a unit whose getter, filter or
/// action was never set is inert (produces nothing, selects nothing, does
/// nothing) rather than an error.
pub struct BulkAction<'h, H> {
    host: &'h H,
    getter: Box<dyn Fn(&H) -> Vec<BreakpointRecord> + 'h>,
    filter: Box<dyn Fn(&BreakpointRecord) -> bool + 'h>,
    action: Box<dyn Fn(&H, &BreakpointRecord) + 'h>,
}

impl<'h, H: Host> BulkAction<'h, H> {
    pub fn new(host: &'h H) -> Self {
        Self {
            host,
            getter: Box::new(|_| Vec::new()),
            filter: Box::new(|_| false),
            action: Box::new(|_, _| {}),
        }
    }

    pub fn getter(mut self, getter: impl Fn(&H) -> Vec<BreakpointRecord> + 'h) -> Self {
        self.getter = Box::new(getter);
        self
    }

    pub fn filter(mut self, filter: impl Fn(&BreakpointRecord) -> bool + 'h) -> Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn action(mut self, action: impl Fn(&H, &BreakpointRecord) + 'h) -> Self {
        self.action = Box::new(action);
        self
    }

    /// Getter from a [`Scope`].
    pub fn scope(self, scope: Scope) -> Self {
        self.getter(move |host| scope.resolve(host))
    }

    /// Filter from a [`Category`].
    pub fn category(self, category: Category) -> Self {
        self.filter(move |record| category.selects(record))
    }

    /// Action from an [`Operation`].
    pub fn operation(self, operation: Operation) -> Self {
        self.action(move |host, record| operation.apply(host, record))
    }

    /// Evaluates the getter once, filters, and applies the action to every
    /// surviving record in getter order.
    pub fn run(&self) {
        let records = (self.getter)(self.host);
        for record in records.iter().filter(|r| (self.filter)(r)) {
            (self.action)(self.host, record);
        }
    }
}

#[cfg(test)]
mod tests {
    use debugpoints_host::memory::MemoryHost;
    use debugpoints_host::{BreakpointSpec, BreakpointStore, LineColumn, Location, Range};

    use super::*;

    fn host_with_workspace() -> MemoryHost {
        let host = MemoryHost::new();
        host.add_folder("/root");
        host
    }

    fn seed(host: &MemoryHost, path: &str, spec_fn: impl FnOnce(BreakpointSpec) -> BreakpointSpec) {
        let spec = BreakpointSpec::plain(Location::new(path, Range::at(LineColumn::new(0, 0))));
        host.seed_breakpoint(spec_fn(spec));
    }

    #[test]
    fn defaults_are_inert() {
        let host = host_with_workspace();
        seed(&host, "/root/a.ts", |s| s);

        BulkAction::new(&host).run();
        // Even with a getter and action, the unset filter selects nothing.
        BulkAction::new(&host)
            .scope(Scope::Workspace)
            .operation(Operation::Remove)
            .run();

        assert!(host.removed_ids().is_empty());
        assert!(host.added_specs().is_empty());
    }

    #[test]
    fn remove_by_category_only_touches_matching_records() {
        let host = host_with_workspace();
        seed(&host, "/root/a.ts", |s| s);
        seed(&host, "/root/b.ts", |s| s.with_log_message("x = {x}"));

        BulkAction::new(&host)
            .scope(Scope::Workspace)
            .category(Category::Log)
            .operation(Operation::Remove)
            .run();

        assert_eq!(host.removed_ids(), vec!["bp-2".to_string()]);
        assert_eq!(host.breakpoints().len(), 1);
    }

    #[test]
    fn remove_twice_is_idempotent() {
        let host = host_with_workspace();
        seed(&host, "/root/a.ts", |s| s);

        let action = BulkAction::new(&host)
            .scope(Scope::Workspace)
            .category(Category::All)
            .operation(Operation::Remove);
        action.run();
        action.run();

        // The second pass resolved an empty set; only one removal issued.
        assert_eq!(host.removed_ids().len(), 1);
    }

    #[test]
    fn disable_replaces_with_identical_attributes() {
        let host = host_with_workspace();
        seed(&host, "/root/a.ts", |s| s.with_condition("x > 1"));

        BulkAction::new(&host)
            .scope(Scope::Workspace)
            .category(Category::Conditional)
            .operation(Operation::Disable)
            .run();

        assert_eq!(host.removed_ids(), vec!["bp-1".to_string()]);
        let added = host.added_specs();
        assert_eq!(added.len(), 1);
        assert!(!added[0].enabled);
        assert_eq!(added[0].condition.as_deref(), Some("x > 1"));
        assert_eq!(added[0].location.path, std::path::PathBuf::from("/root/a.ts"));
    }

    #[test]
    fn enable_sets_the_enabled_flag() {
        let host = host_with_workspace();
        seed(&host, "/root/a.ts", |s| BreakpointSpec {
            enabled: false,
            ..s
        });

        BulkAction::new(&host)
            .scope(Scope::Workspace)
            .category(Category::Plain)
            .operation(Operation::Enable)
            .run();

        let added = host.added_specs();
        assert_eq!(added.len(), 1);
        assert!(added[0].enabled);
    }

    #[test]
    fn one_time_category_ignores_ordinary_conditionals() {
        let host = host_with_workspace();
        seed(&host, "/root/a.ts", |s| s.with_condition("x > 1"));
        seed(&host, "/root/b.ts", |s| {
            s.with_condition(debugpoints_breakpoint::ONE_TIME_CONDITION)
        });

        BulkAction::new(&host)
            .scope(Scope::Workspace)
            .category(Category::OneTime)
            .operation(Operation::Remove)
            .run();

        assert_eq!(host.removed_ids(), vec!["bp-2".to_string()]);
    }
}
