use crate::{
    api::{MintApi, MintApiRequest},
    chain::ChainClient,
    config::MintConfiguration,
    error::MintError,
    metadata::MetadataStorage,
    notify::{NftCache, Notifier},
    strategy::{
        MintRequest, MintResult, MintStrategy, PENDING_ASSET_ID, ROYALTY_BASIS_POINTS,
        select_strategy,
    },
    wallet::{SignerHandle, SignerResolution, WalletContext},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use mpl_bubblegum::{
    instructions::MintV1Builder,
    types::{Creator, MetadataArgs, TokenProgramVersion, TokenStandard},
};
use solana_sdk::{message::Message, pubkey::Pubkey, transaction::Transaction};
use std::{sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;

/// The indexer lags a confirmed mint; refresh the owner's NFT list once
/// quickly and once after the lag has had time to clear.
pub const REFRESH_DELAYS: [Duration; 2] = [Duration::from_secs(2), Duration::from_secs(15)];

/// One mint attempt runs as one sequential async flow. Concurrent calls are
/// independent flows; nothing here coordinates them.
pub struct MintOrchestrator {
    config: Arc<MintConfiguration>,
    pub wallet: WalletContext,
    chain: Arc<dyn ChainClient>,
    storage: Arc<dyn MetadataStorage>,
    mint_api: Arc<dyn MintApi>,
    notifier: Arc<dyn Notifier>,
    cache: Arc<dyn NftCache>,
    refresh_delays: [Duration; 2],
    shutdown: CancellationToken,
}

impl MintOrchestrator {
    pub fn new(
        config: Arc<MintConfiguration>,
        wallet: WalletContext,
        chain: Arc<dyn ChainClient>,
        storage: Arc<dyn MetadataStorage>,
        mint_api: Arc<dyn MintApi>,
        notifier: Arc<dyn Notifier>,
        cache: Arc<dyn NftCache>,
    ) -> Self {
        Self {
            config,
            wallet,
            chain,
            storage,
            mint_api,
            notifier,
            cache,
            refresh_delays: REFRESH_DELAYS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_refresh_delays(mut self, delays: [Duration; 2]) -> Self {
        self.refresh_delays = delays;
        self
    }

    pub async fn mint(&self, request: MintRequest) -> Result<MintResult, MintError> {
        match self.mint_inner(&request).await {
            Ok((strategy, result)) => {
                self.notifier.success(&success_message(strategy, &result));
                self.schedule_refresh();
                Ok(result)
            }
            Err(error) => {
                self.notifier.error(&display_error(&error));
                Err(error)
            }
        }
    }

    async fn mint_inner(
        &self,
        request: &MintRequest,
    ) -> Result<(MintStrategy, MintResult), MintError> {
        let strategy = select_strategy(
            self.config.tree_address.is_some(),
            request.force_helius_fallback,
        );
        tracing::debug!(?strategy, name = %request.name, "strategy selected");

        match strategy {
            MintStrategy::UserSigned => {
                let Some(merkle_tree) = self.config.tree_address else {
                    return Err(MintError::Other(anyhow::anyhow!(
                        "user-signed strategy selected without a configured tree"
                    )));
                };
                match self.wallet.resolve_signer(&self.chain) {
                    SignerResolution::Signer(signer) => {
                        if !signer.can_sign() {
                            return Err(MintError::SigningUnsupported);
                        }
                        tracing::debug!(signer = %signer.pubkey(), "signer resolved");
                        let result = self.mint_user_signed(request, &signer, merkle_tree).await?;
                        Ok((MintStrategy::UserSigned, result))
                    }
                    SignerResolution::Reroute(owner) => {
                        // This masks a connection/configuration mismatch, so
                        // make it loud even though the mint still goes through.
                        tracing::warn!(
                            %owner,
                            "no adapter or injected wallet reachable; re-routing to the hosted mint API with the side-channel address"
                        );
                        let result = self.mint_server_signed(request, owner).await?;
                        Ok((MintStrategy::ServerSigned, result))
                    }
                    SignerResolution::None => Err(MintError::WalletNotConnected),
                }
            }
            MintStrategy::ServerSigned => {
                let owner = self
                    .wallet
                    .account_address()
                    .ok_or(MintError::WalletNotConnected)?;
                let result = self.mint_server_signed(request, owner).await?;
                Ok((MintStrategy::ServerSigned, result))
            }
        }
    }

    async fn mint_user_signed(
        &self,
        request: &MintRequest,
        signer: &SignerHandle,
        merkle_tree: Pubkey,
    ) -> Result<MintResult, MintError> {
        let uri = self.storage.metadata_uri(&request.name).await?;
        let payer = signer.pubkey();
        let tree_config = mpl_bubblegum::accounts::TreeConfig::find_pda(&merkle_tree).0;

        let metadata = MetadataArgs {
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            uri,
            seller_fee_basis_points: ROYALTY_BASIS_POINTS,
            primary_sale_happened: false,
            is_mutable: true,
            edition_nonce: None,
            token_standard: Some(TokenStandard::NonFungible),
            collection: None,
            uses: None,
            token_program_version: TokenProgramVersion::Original,
            creators: vec![Creator {
                address: payer,
                verified: false,
                share: 100,
            }],
        };

        let mint_ix = MintV1Builder::new()
            .leaf_delegate(payer)
            .leaf_owner(payer)
            .merkle_tree(merkle_tree)
            .payer(payer)
            .tree_config(tree_config)
            .tree_creator_or_delegate(payer)
            .metadata(metadata)
            .instruction();

        let recent_blockhash = self.chain.latest_blockhash().await?;
        let message = Message::new_with_blockhash(&[mint_ix], Some(&payer), &recent_blockhash);
        let transaction = signer.sign_transaction(Transaction::new_unsigned(message)).await?;

        tracing::debug!("submitting mint transaction");
        let signature = self.chain.send_and_confirm(&transaction).await?;

        // Asset id resolution happens in the indexer, out-of-band.
        Ok(MintResult {
            signature: BASE64.encode(signature.as_ref()),
            asset_id: PENDING_ASSET_ID.to_owned(),
        })
    }

    async fn mint_server_signed(
        &self,
        request: &MintRequest,
        owner: String,
    ) -> Result<MintResult, MintError> {
        let api_request = MintApiRequest {
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            owner,
            description: request.description.clone(),
            image_url: request.image_url.clone(),
        };
        self.mint_api.mint_compressed_nft(&api_request).await
    }

    /// Fire-and-forget, but the group dies with the orchestrator.
    fn schedule_refresh(&self) {
        for delay in self.refresh_delays {
            let cache = self.cache.clone();
            let token = self.shutdown.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = token.cancelled() => {}
                    _ = tokio::time::sleep(delay) => cache.invalidate(),
                }
            });
        }
    }
}

impl Drop for MintOrchestrator {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn success_message(strategy: MintStrategy, result: &MintResult) -> String {
    match strategy {
        MintStrategy::ServerSigned => {
            format!("Mint succeeded. Asset ID: {}", result.asset_id)
        }
        MintStrategy::UserSigned => format!(
            "Mint confirmed ({}). Metadata is a mock placeholder; the asset shows up once indexing catches up.",
            result.signature
        ),
    }
}

fn display_error(error: &MintError) -> String {
    let message = error.to_string();
    if message.contains(MintConfiguration::TREE_ADDRESS_VAR) {
        format!(
            "No mint tree is configured. Set {} to an existing merkle tree address, or retry with the hosted mint API.",
            MintConfiguration::TREE_ADDRESS_VAR
        )
    } else {
        message
    }
}
