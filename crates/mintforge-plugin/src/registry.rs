//! Action registry for managing available actions

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::plugin::{Action, ActionInfo};

/// Registry for managing and retrieving actions.
///
/// Thread-safe and async-compatible using tokio's RwLock. Multiple async
/// tasks can read actions simultaneously without blocking, while write
/// operations (registration) are serialized.
#[derive(Clone)]
pub struct ActionRegistry {
    actions: Arc<RwLock<HashMap<String, Arc<dyn Action>>>>,
    action_info: Arc<RwLock<HashMap<String, ActionInfo>>>,
}

impl ActionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            actions: Arc::new(RwLock::new(HashMap::new())),
            action_info: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register an action with the registry
    ///
    /// Registration typically happens once at plugin initialization; a later
    /// registration under the same name replaces the earlier one.
    pub async fn register(&self, action: Arc<dyn Action>, info: ActionInfo) -> Result<()> {
        let name = action.name().to_string();

        let mut actions = self.actions.write().await;
        let mut action_info = self.action_info.write().await;

        actions.insert(name.clone(), action);
        action_info.insert(name, info);

        Ok(())
    }

    /// Get an action by name
    pub async fn get(&self, name: &str) -> Result<Arc<dyn Action>> {
        let actions = self.actions.read().await;

        actions
            .get(name)
            .cloned()
            .with_context(|| format!("Action '{}' not found", name))
    }

    /// List all registered actions
    pub async fn list(&self) -> Result<Vec<ActionInfo>> {
        let action_info = self.action_info.read().await;

        Ok(action_info.values().cloned().collect())
    }

    /// Check if an action is registered
    pub async fn contains(&self, name: &str) -> Result<bool> {
        let actions = self.actions.read().await;

        Ok(actions.contains_key(name))
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{ActionContext, ActionOutcome};
    use async_trait::async_trait;

    #[derive(Debug)]
    struct NoopAction;

    #[async_trait]
    impl Action for NoopAction {
        fn name(&self) -> &str {
            "NOOP"
        }

        async fn execute(&self, _context: ActionContext) -> Result<ActionOutcome> {
            Ok(ActionOutcome::success(serde_json::Value::Null))
        }

        fn validate_payload(&self, _payload: &serde_json::Value) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_register_and_get() {
        let registry = ActionRegistry::new();
        registry
            .register(
                Arc::new(NoopAction),
                ActionInfo {
                    name: "NOOP".to_string(),
                    description: "does nothing".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(registry.contains("NOOP").await.unwrap());
        assert_eq!(registry.get("NOOP").await.unwrap().name(), "NOOP");
        assert_eq!(registry.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_action_fails() {
        let registry = ActionRegistry::new();
        let err = registry.get("MISSING").await.unwrap_err();
        assert!(err.to_string().contains("MISSING"), "got: {}", err);
    }
}
