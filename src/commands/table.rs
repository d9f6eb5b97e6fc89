//! Environment-filtered command table

use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::environment::EnvironmentPredicates;
use crate::protocol::{CommandDescriptor, CommandRegistry};

/// Commands callable on one session
///
/// Read-only once built; a reload builds a new table.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: HashMap<&'static str, CommandDescriptor>,
}

/// Keep every descriptor whose applicability holds for `environment`.
///
/// Descriptors are tested independently. When two applicable descriptors share
/// a name, the later one in registry order wins.
pub fn build(registry: &CommandRegistry, environment: &EnvironmentPredicates) -> CommandTable {
    let mut commands = HashMap::new();
    for descriptor in registry.iter().filter(|d| d.is_applicable(environment)) {
        commands.insert(descriptor.name, *descriptor);
    }

    debug!(
        "Built command table with {} of {} commands",
        commands.len(),
        registry.len()
    );
    CommandTable { commands }
}

impl CommandTable {
    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Command names, sorted
    pub fn names(&self) -> BTreeSet<&'static str> {
        self.commands.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
