//! Compressed-NFT minting: configuration, wallet signer handles, and the
//! orchestrator that picks between a user-signed Bubblegum mint and the
//! hosted Helius mint API.

pub mod api;
pub mod chain;
pub mod config;
pub mod error;
pub mod metadata;
pub mod notify;
pub mod orchestrator;
pub mod strategy;
pub mod wallet;

pub use config::{MintConfiguration, SolanaNet};
pub use error::MintError;
pub use orchestrator::MintOrchestrator;
pub use strategy::{MintRequest, MintResult, MintStrategy, select_strategy};
pub use wallet::{SignerHandle, WalletContext};
