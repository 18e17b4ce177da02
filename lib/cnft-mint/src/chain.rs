use crate::error::MintError;
use async_trait::async_trait;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
    rpc_request::{RpcError, RpcResponseErrorData},
    rpc_response::RpcSimulateTransactionResult,
};
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, signature::Signature,
    transaction::Transaction,
};

/// The two chain interactions a mint attempt needs. Kept behind a trait so
/// the orchestrator can be driven without a validator in tests.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn latest_blockhash(&self) -> Result<Hash, MintError>;
    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature, MintError>;
}

pub struct RpcChainClient {
    rpc: RpcClient,
}

impl RpcChainClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            rpc: RpcClient::new(endpoint),
        }
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn latest_blockhash(&self) -> Result<Hash, MintError> {
        self.rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| MintError::Submit(verbose_solana_error(&e)))
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature, MintError> {
        let commitment = CommitmentConfig::confirmed();
        tracing::trace!("submitting transaction");
        self.rpc
            .send_and_confirm_transaction_with_spinner_and_commitment(transaction, commitment)
            .await
            .map_err(|e| MintError::Submit(verbose_solana_error(&e)))
    }
}

/// Include simulation logs in RPC failures; the bare error message alone
/// rarely says which instruction failed.
pub fn verbose_solana_error(err: &ClientError) -> String {
    use std::fmt::Write;
    if let ClientErrorKind::RpcError(RpcError::RpcResponseError {
        code,
        message,
        data,
    }) = &err.kind
    {
        let mut s = String::new();
        let _ = writeln!(s, "{} ({})", message, code);
        if let RpcResponseErrorData::SendTransactionPreflightFailure(
            RpcSimulateTransactionResult {
                logs: Some(logs), ..
            },
        ) = data
        {
            for (i, log) in logs.iter().enumerate() {
                let _ = writeln!(s, "{}: {}", i + 1, log);
            }
        }
        s
    } else {
        err.to_string()
    }
}
