//! Insertion-ordered table of state definitions.
//!
//! Insertion order doubles as a compact encoding: the first state added has
//! ordinal 1, the second ordinal 2, and so on. Ordinal 0 never names a state.

use super::state::StateDefinition;
use std::collections::HashMap;

/// Per-machine mapping from state name to its definition.
///
/// # Example
///
/// ```rust
/// use tickstate::core::{StateDefinition, StateTable};
///
/// let mut table: StateTable<()> = StateTable::new();
/// table.insert(StateDefinition::indefinite("Idle"));
/// table.insert(StateDefinition::indefinite("Patrol"));
///
/// assert_eq!(table.name_from_ordinal(2), Some("Patrol"));
/// assert_eq!(table.ordinal_from_name("Idle"), Some(1));
/// assert_eq!(table.ordinal_from_name("Flee"), None);
/// ```
pub struct StateTable<C> {
    states: HashMap<String, StateDefinition<C>>,
    order: Vec<String>,
}

impl<C> Default for StateTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> StateTable<C> {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Insert or overwrite a definition. Returns `true` if the name is new.
    ///
    /// An overwritten state keeps its original ordinal.
    pub fn insert(&mut self, definition: StateDefinition<C>) -> bool {
        let name = definition.name().to_string();
        let is_new = self.states.insert(name.clone(), definition).is_none();
        if is_new {
            self.order.push(name);
        }
        is_new
    }

    pub fn get(&self, name: &str) -> Option<&StateDefinition<C>> {
        self.states.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// State names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Definitions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &StateDefinition<C>> {
        self.order.iter().filter_map(|name| self.states.get(name))
    }

    /// Name at the 1-based insertion position, or `None` if out of range.
    pub fn name_from_ordinal(&self, ordinal: usize) -> Option<&str> {
        ordinal
            .checked_sub(1)
            .and_then(|index| self.order.get(index))
            .map(String::as_str)
    }

    /// 1-based insertion position of `name`, or `None` if unregistered.
    pub fn ordinal_from_name(&self, name: &str) -> Option<usize> {
        self.order
            .iter()
            .position(|candidate| candidate == name)
            .map(|index| index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn table(names: &[&str]) -> StateTable<()> {
        let mut table = StateTable::new();
        for name in names {
            table.insert(StateDefinition::indefinite(*name));
        }
        table
    }

    #[test]
    fn new_table_is_empty() {
        let table: StateTable<()> = StateTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.name_from_ordinal(1), None);
    }

    #[test]
    fn ordinals_follow_insertion_order() {
        let table = table(&["Idle", "Walking", "Attack"]);

        assert_eq!(table.name_from_ordinal(1), Some("Idle"));
        assert_eq!(table.name_from_ordinal(2), Some("Walking"));
        assert_eq!(table.name_from_ordinal(3), Some("Attack"));
        assert_eq!(table.ordinal_from_name("Attack"), Some(3));
    }

    #[test]
    fn ordinal_zero_and_past_end_are_absent() {
        let table = table(&["Idle", "Walking"]);

        assert_eq!(table.name_from_ordinal(0), None);
        assert_eq!(table.name_from_ordinal(3), None);
        assert_eq!(table.name_from_ordinal(usize::MAX), None);
    }

    #[test]
    fn overwrite_keeps_ordinal() {
        let mut table = table(&["Idle", "Walking"]);

        let idle = StateDefinition::new("Idle", Duration::from_secs(2)).then("Walking");
        let is_new = table.insert(idle);

        assert!(!is_new);
        assert_eq!(table.len(), 2);
        assert_eq!(table.ordinal_from_name("Idle"), Some(1));
        assert_eq!(table.get("Idle").unwrap().duration(), Duration::from_secs(2));
    }

    #[test]
    fn iter_yields_definitions_in_order() {
        let table = table(&["C", "A", "B"]);
        let names: Vec<&str> = table.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert_eq!(table.names().collect::<Vec<_>>(), names);
    }
}
