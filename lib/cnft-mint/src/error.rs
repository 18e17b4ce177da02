use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, MintError>;

/// Every failure is terminal for its mint attempt; nothing here is retried.
#[derive(Debug, ThisError)]
pub enum MintError {
    #[error("no wallet connected")]
    WalletNotConnected,
    #[error("connected wallet cannot sign transactions")]
    SigningUnsupported,
    #[error("server mint failed: {0}")]
    ServerMintFailed(String),
    #[error("{0}")]
    Submit(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
