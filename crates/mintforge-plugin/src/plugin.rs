//! Plugin core infrastructure
//!
//! This module provides the abstraction layer between the host runtime and
//! the action implementations: the [`Action`] trait, the context of injected
//! services an action runs with, and the plugin entry point that wires
//! everything together at initialization.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

use crate::image::ImageGenerator;
use crate::registry::ActionRegistry;
use crate::wallet::MintWallet;
use mintforge_core::{AppError, SettingsSource};
use mintforge_storage::UploadService;

/// Context provided to actions during execution
///
/// Actions only use the injected services; they never look collaborators up
/// through a global registry. The `payload` is the request the host runtime
/// already templated for this action.
///
/// # Security Note
///
/// The payload may embed prompt text a user authored. Actions may log it,
/// but must never log the settings the services were constructed from.
#[derive(Clone)]
pub struct ActionContext {
    /// Upload service for image and metadata artifacts
    pub uploader: Arc<UploadService>,
    /// Generative-image capability
    pub image_generator: Arc<dyn ImageGenerator>,
    /// Wallet capability for on-chain collection creation and minting
    pub wallet: Arc<dyn MintWallet>,
    /// Action-specific request payload
    pub payload: serde_json::Value,
}

/// Action execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionStatus {
    /// Action completed successfully
    Success,
    /// Action failed
    Failed,
}

/// Result returned by action execution
///
/// Upstream failures (image generation, uploads, wallet calls) surface here
/// as `Failed` with an error message; they are data, not panics or errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Action execution status
    pub status: ActionStatus,
    /// Output data from the action (addresses, URLs)
    pub data: serde_json::Value,
    /// Optional error message if execution failed
    pub error: Option<String>,
}

impl ActionOutcome {
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            status: ActionStatus::Success,
            data,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Failed,
            data: serde_json::Value::Null,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ActionStatus::Success
    }
}

/// Trait that all actions must implement
#[async_trait]
pub trait Action: Send + Sync + Debug {
    /// Get the action name/identifier
    fn name(&self) -> &str;

    /// Execute the action with the given context
    async fn execute(&self, context: ActionContext) -> Result<ActionOutcome>;

    /// Validate an incoming payload without executing
    fn validate_payload(&self, payload: &serde_json::Value) -> Result<()>;
}

/// Action information for listing available actions
#[derive(Debug, Clone, Serialize)]
pub struct ActionInfo {
    /// Action name/identifier
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// Plugin entry point held by the host runtime.
///
/// One instance per runtime context, constructed with explicit services.
/// Construction is the only fatal path: missing storage credentials abort
/// initialization.
pub struct NftGenerationPlugin {
    uploader: Arc<UploadService>,
    image_generator: Arc<dyn ImageGenerator>,
    wallet: Arc<dyn MintWallet>,
    registry: ActionRegistry,
}

impl NftGenerationPlugin {
    /// Initialize the plugin from host settings.
    ///
    /// Builds the S3-backed upload service (fatal on missing credentials)
    /// and registers the built-in actions.
    pub async fn initialize(
        settings: &dyn SettingsSource,
        image_generator: Arc<dyn ImageGenerator>,
        wallet: Arc<dyn MintWallet>,
    ) -> Result<Self, AppError> {
        let uploader = UploadService::from_settings(settings)
            .map_err(|e| AppError::Storage(e.to_string()))?;

        Self::with_services(Arc::new(uploader), image_generator, wallet)
            .await
            .map_err(|e| AppError::internal_with_source("Failed to register actions", e))
    }

    /// Wire the plugin over already-constructed services.
    pub async fn with_services(
        uploader: Arc<UploadService>,
        image_generator: Arc<dyn ImageGenerator>,
        wallet: Arc<dyn MintWallet>,
    ) -> Result<Self> {
        let registry = ActionRegistry::new();

        registry
            .register(
                Arc::new(crate::actions::CreateCollectionAction),
                ActionInfo {
                    name: crate::actions::CREATE_COLLECTION.to_string(),
                    description: "Generate a cover image and create an NFT collection on chain"
                        .to_string(),
                },
            )
            .await?;
        registry
            .register(
                Arc::new(crate::actions::MintNftAction),
                ActionInfo {
                    name: crate::actions::MINT_NFT.to_string(),
                    description: "Generate a token image and mint it into a collection"
                        .to_string(),
                },
            )
            .await?;

        Ok(Self {
            uploader,
            image_generator,
            wallet,
            registry,
        })
    }

    /// Dispatch a named action with the given payload.
    pub async fn handle(
        &self,
        action_name: &str,
        payload: serde_json::Value,
    ) -> Result<ActionOutcome> {
        let action = self.registry.get(action_name).await?;
        action.validate_payload(&payload)?;

        tracing::info!(action = %action_name, "Executing plugin action");

        action
            .execute(ActionContext {
                uploader: self.uploader.clone(),
                image_generator: self.image_generator.clone(),
                wallet: self.wallet.clone(),
                payload,
            })
            .await
    }

    /// List the registered actions.
    pub async fn actions(&self) -> Result<Vec<ActionInfo>> {
        self.registry.list().await
    }
}
