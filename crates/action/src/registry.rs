//! Action registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::action::LifecycleAction;
use crate::metadata::ActionMetadata;

/// Registry for discovering and retrieving actions by key.
///
/// The CLI populates this at startup from the catalog and resolves the
/// invoked key to a concrete implementation. Actions are stored as
/// `Arc<dyn LifecycleAction>` for shared ownership.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn LifecycleAction>>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action. Overwrites any existing action with the same key.
    pub fn register(&mut self, action: Arc<dyn LifecycleAction>) {
        let key = action.metadata().key.clone();
        self.actions.insert(key, action);
    }

    /// Look up an action by its key.
    pub fn get(&self, key: &str) -> Option<&Arc<dyn LifecycleAction>> {
        self.actions.get(key)
    }

    /// Whether an action with the given key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.actions.contains_key(key)
    }

    /// Metadata for all registered actions, sorted by key for stable
    /// listings.
    pub fn list(&self) -> Vec<&ActionMetadata> {
        let mut all: Vec<&ActionMetadata> =
            self.actions.values().map(|a| a.metadata()).collect();
        all.sort_by_key(|m| m.key.as_str());
        all
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if no actions are registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("count", &self.actions.len())
            .field("keys", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use stratus_core::OperationKind;
    use stratus_error::Result;
    use stratus_schema::ActionRequest;

    use super::*;
    use crate::action::Action;
    use crate::context::ActionContext;
    use crate::result::LifecycleResult;

    struct DummyAction(ActionMetadata);

    impl Action for DummyAction {
        fn metadata(&self) -> &ActionMetadata {
            &self.0
        }
    }

    #[async_trait]
    impl LifecycleAction for DummyAction {
        async fn execute(
            &self,
            _request: &ActionRequest,
            _ctx: &ActionContext,
        ) -> Result<LifecycleResult> {
            Ok(LifecycleResult::deleted())
        }
    }

    fn make_action(key: &str, name: &str) -> Arc<dyn LifecycleAction> {
        Arc::new(DummyAction(ActionMetadata::new(
            key,
            name,
            "test",
            OperationKind::Delete,
        )))
    }

    #[test]
    fn empty_registry() {
        let reg = ActionRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.get("anything").is_none());
    }

    #[test]
    fn register_and_get() {
        let mut reg = ActionRegistry::new();
        reg.register(make_action("queue.delete", "Delete Queue"));

        assert_eq!(reg.len(), 1);
        assert!(reg.contains("queue.delete"));
        let action = reg.get("queue.delete").unwrap();
        assert_eq!(action.metadata().name, "Delete Queue");
    }

    #[test]
    fn overwrite_existing() {
        let mut reg = ActionRegistry::new();
        reg.register(make_action("x", "Version 1"));
        reg.register(make_action("x", "Version 2"));

        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("x").unwrap().metadata().name, "Version 2");
    }

    #[test]
    fn list_is_sorted_by_key() {
        let mut reg = ActionRegistry::new();
        reg.register(make_action("b.second", "B"));
        reg.register(make_action("a.first", "A"));

        let keys: Vec<&str> = reg.list().iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["a.first", "b.second"]);
    }
}
