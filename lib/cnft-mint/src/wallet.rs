use crate::{chain::ChainClient, config::MintConfiguration, error::MintError};
use async_trait::async_trait;
use solana_sdk::{
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    message::Message,
    pubkey::Pubkey,
    transaction::Transaction,
};
use std::sync::Arc;

/// Wallet brands offered to the connection UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletBrand {
    Phantom,
    Solflare,
}

/// A connected wallet-adapter instance.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Whether single-transaction signing is available at all.
    fn can_sign(&self) -> bool;

    async fn sign_transaction(&self, transaction: Transaction)
    -> Result<Transaction, MintError>;

    /// Default: sequential single signs, caller order preserved.
    async fn sign_all_transactions(
        &self,
        transactions: Vec<Transaction>,
    ) -> Result<Vec<Transaction>, MintError> {
        let mut signed = Vec::with_capacity(transactions.len());
        for tx in transactions {
            signed.push(self.sign_transaction(tx).await?);
        }
        Ok(signed)
    }
}

/// A raw browser-injected wallet object: it can sign what it is handed but
/// knows nothing about transaction prerequisites.
#[async_trait]
pub trait InjectedWallet: Send + Sync {
    fn pubkey(&self) -> Pubkey;
    fn supports_sign_all(&self) -> bool;
    async fn sign(&self, transaction: Transaction) -> Result<Transaction, MintError>;
    async fn sign_all(
        &self,
        transactions: Vec<Transaction>,
    ) -> Result<Vec<Transaction>, MintError>;
}

/// Synthesized adapter around an injected wallet. Fills in missing
/// prerequisites (recent blockhash, fee payer) before delegating, and
/// degrades batch signing to sequential single signs when the extension
/// does not support it.
pub struct ExtensionSigner {
    wallet: Arc<dyn InjectedWallet>,
    chain: Arc<dyn ChainClient>,
}

impl ExtensionSigner {
    pub fn new(wallet: Arc<dyn InjectedWallet>, chain: Arc<dyn ChainClient>) -> Self {
        Self { wallet, chain }
    }

    async fn prepare(&self, transaction: &mut Transaction) -> Result<(), MintError> {
        if transaction.message.recent_blockhash == Hash::default() {
            transaction.message.recent_blockhash = self.chain.latest_blockhash().await?;
        }
        if transaction.message.account_keys.is_empty() {
            return Err(MintError::Submit(
                "transaction has no fee payer and no instructions".to_owned(),
            ));
        }
        // A message compiled without a payer requires zero signatures and no
        // wallet can sign it. Rebuild it with the wallet's key as payer.
        if transaction.message.header.num_required_signatures == 0 {
            let payer = self.wallet.pubkey();
            let message = Message::new_with_blockhash(
                &decompile(&transaction.message),
                Some(&payer),
                &transaction.message.recent_blockhash,
            );
            *transaction = Transaction::new_unsigned(message);
        }
        Ok(())
    }
}

fn decompile(message: &Message) -> Vec<Instruction> {
    message
        .instructions
        .iter()
        .map(|compiled| Instruction {
            program_id: message.account_keys[compiled.program_id_index as usize],
            accounts: compiled
                .accounts
                .iter()
                .map(|&index| {
                    let index = index as usize;
                    AccountMeta {
                        pubkey: message.account_keys[index],
                        is_signer: message.is_signer(index),
                        is_writable: message.is_maybe_writable(index, None),
                    }
                })
                .collect(),
            data: compiled.data.clone(),
        })
        .collect()
}

#[async_trait]
impl WalletSigner for ExtensionSigner {
    fn pubkey(&self) -> Pubkey {
        self.wallet.pubkey()
    }

    fn can_sign(&self) -> bool {
        true
    }

    async fn sign_transaction(
        &self,
        mut transaction: Transaction,
    ) -> Result<Transaction, MintError> {
        self.prepare(&mut transaction).await?;
        self.wallet.sign(transaction).await
    }

    async fn sign_all_transactions(
        &self,
        mut transactions: Vec<Transaction>,
    ) -> Result<Vec<Transaction>, MintError> {
        for tx in &mut transactions {
            self.prepare(tx).await?;
        }
        if self.wallet.supports_sign_all() {
            self.wallet.sign_all(transactions).await
        } else {
            let mut signed = Vec::with_capacity(transactions.len());
            for tx in transactions {
                signed.push(self.wallet.sign(tx).await?);
            }
            Ok(signed)
        }
    }
}

/// Tagged signer capability: dispatch happens on the variant, never on
/// ad-hoc property probing.
#[derive(Clone)]
pub enum SignerHandle {
    Adapter(Arc<dyn WalletSigner>),
    Extension(Arc<ExtensionSigner>),
}

impl SignerHandle {
    pub fn pubkey(&self) -> Pubkey {
        match self {
            SignerHandle::Adapter(signer) => signer.pubkey(),
            SignerHandle::Extension(signer) => signer.pubkey(),
        }
    }

    pub fn can_sign(&self) -> bool {
        match self {
            SignerHandle::Adapter(signer) => signer.can_sign(),
            SignerHandle::Extension(signer) => signer.can_sign(),
        }
    }

    pub async fn sign_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Transaction, MintError> {
        match self {
            SignerHandle::Adapter(signer) => signer.sign_transaction(transaction).await,
            SignerHandle::Extension(signer) => signer.sign_transaction(transaction).await,
        }
    }

    pub async fn sign_all_transactions(
        &self,
        transactions: Vec<Transaction>,
    ) -> Result<Vec<Transaction>, MintError> {
        match self {
            SignerHandle::Adapter(signer) => signer.sign_all_transactions(transactions).await,
            SignerHandle::Extension(signer) => signer.sign_all_transactions(transactions).await,
        }
    }
}

/// Outcome of signer resolution for a user-signed mint.
pub enum SignerResolution {
    Signer(SignerHandle),
    /// No signer reachable, but an account address is known through a side
    /// channel; the orchestrator re-routes to the server-signed strategy.
    Reroute(String),
    None,
}

/// Connection state established once per session: the RPC endpoint, the
/// adapters offered to the UI, and whatever connection sources are live.
pub struct WalletContext {
    pub endpoint: String,
    pub offered: Vec<WalletBrand>,
    pub auto_connect: bool,
    pub adapter: Option<Arc<dyn WalletSigner>>,
    pub injected: Option<Arc<dyn InjectedWallet>>,
    /// Account address known through a separate connection source.
    pub external_address: Option<String>,
}

impl WalletContext {
    pub fn new(config: &MintConfiguration) -> Self {
        Self {
            endpoint: config.endpoint(),
            offered: vec![WalletBrand::Phantom, WalletBrand::Solflare],
            auto_connect: true,
            adapter: None,
            injected: None,
            external_address: None,
        }
    }

    /// The address mints are attributed to, from the strongest available
    /// connection source.
    pub fn account_address(&self) -> Option<String> {
        if let Some(adapter) = &self.adapter {
            return Some(adapter.pubkey().to_string());
        }
        if let Some(injected) = &self.injected {
            return Some(injected.pubkey().to_string());
        }
        self.external_address.clone()
    }

    /// Prefer a connected adapter, then a probed injected wallet, then the
    /// side-channel address.
    pub fn resolve_signer(&self, chain: &Arc<dyn ChainClient>) -> SignerResolution {
        if let Some(adapter) = &self.adapter {
            return SignerResolution::Signer(SignerHandle::Adapter(adapter.clone()));
        }
        if let Some(injected) = &self.injected {
            let signer = ExtensionSigner::new(injected.clone(), chain.clone());
            return SignerResolution::Signer(SignerHandle::Extension(Arc::new(signer)));
        }
        if let Some(address) = &self.external_address {
            return SignerResolution::Reroute(address.clone());
        }
        SignerResolution::None
    }
}
