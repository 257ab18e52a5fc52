//! Mintforge Plugin Library
//!
//! NFT collection generation for an agent runtime. The host dispatches named
//! actions with already-templated payloads; actions sequence the external
//! capabilities — image generation, object storage, wallet minting — and
//! report their outcome as data.
//!
//! The plugin owns no global state: the host constructs one
//! [`plugin::NftGenerationPlugin`] per runtime context and every action
//! receives its collaborators through [`plugin::ActionContext`].

pub mod actions;
pub mod image;
pub mod plugin;
pub mod registry;
pub mod wallet;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use actions::{CreateCollectionAction, MintNftAction, CREATE_COLLECTION, MINT_NFT};
pub use image::{GeneratedImage, ImageGenerator};
#[cfg(feature = "plugin-replicate")]
pub use image::ReplicateImageGenerator;
pub use plugin::{Action, ActionContext, ActionInfo, ActionOutcome, ActionStatus, NftGenerationPlugin};
pub use registry::ActionRegistry;
pub use wallet::MintWallet;
