use anyhow::{bail, ensure};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use serde_with::skip_serializing_none;
use thiserror::Error as ThisError;

/// Fixed JSON-RPC request id used for every forwarded request.
pub const PROXY_REQUEST_ID: &str = "proxy";

#[derive(Debug)]
pub struct Helius {
    client: reqwest::Client,
    mainnet_url: String,
    devnet_url: String,
}

pub fn is_pubkey(s: &str) -> Result<&str, anyhow::Error> {
    let mut buf = [0u8; 32];
    let written = bs58::decode(s).into(&mut buf)?;
    ensure!(written == buf.len(), "invalid pubkey");
    Ok(s)
}

/// Build the JSON-RPC envelope forwarded to Helius.
pub fn rpc_envelope(method: &str, params: &JsonValue) -> JsonValue {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": PROXY_REQUEST_ID,
        "method": method,
        "params": params,
    })
}

#[derive(Debug, ThisError)]
pub enum HeliusError {
    #[error("helius returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("helius rpc error: {0}")]
    Rpc(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[skip_serializing_none]
#[derive(Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MintCompressedNftRequest {
    pub name: String,
    pub symbol: String,
    pub owner: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub attributes: Option<JsonValue>,
    pub seller_fee_basis_points: Option<u16>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MintCompressedNftResponse {
    pub signature: String,
    pub asset_id: String,
    pub minted: Option<bool>,
}

impl Helius {
    pub fn new(client: reqwest::Client, apikey: &str) -> Self {
        Self {
            client,
            mainnet_url: format!("https://mainnet.helius-rpc.com/?api-key={apikey}"),
            devnet_url: format!("https://devnet.helius-rpc.com/?api-key={apikey}"),
        }
    }

    pub fn get_url(&self, solana_net: &str) -> Result<&str, anyhow::Error> {
        match solana_net {
            "devnet" => Ok(&self.devnet_url),
            "mainnet" | "mainnet-beta" => Ok(&self.mainnet_url),
            _ => bail!("unknown solana_net: {}", solana_net),
        }
    }

    /// Forward an arbitrary method/params pair. The response is returned as-is
    /// so callers can pass status and body through untouched.
    pub async fn rpc_request(
        &self,
        solana_net: &str,
        method: &str,
        params: JsonValue,
    ) -> Result<reqwest::Response, anyhow::Error> {
        let url = self.get_url(solana_net)?;
        let req = rpc_envelope(method, &params);
        tracing::trace!(solana_net, method, "forwarding rpc request");
        Ok(self.client.post(url).json(&req).send().await?)
    }

    pub async fn mint_compressed_nft(
        &self,
        solana_net: &str,
        req: MintCompressedNftRequest,
    ) -> Result<MintCompressedNftResponse, HeliusError> {
        #[derive(Deserialize)]
        struct HeliusResponse {
            result: Option<MintCompressedNftResponse>,
            error: Option<JsonValue>,
        }

        let url = self.get_url(solana_net)?;
        let body = rpc_envelope("mintCompressedNft", &serde_json::to_value(&req)?);

        let resp = self.client.post(url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::debug!(%status, "mintCompressedNft rejected");
            return Err(HeliusError::Status { status, body });
        }

        let parsed = resp.json::<HeliusResponse>().await?;
        if let Some(error) = parsed.error {
            return Err(HeliusError::Rpc(error.to_string()));
        }
        parsed
            .result
            .ok_or_else(|| HeliusError::Rpc("missing result".to_owned()))
    }
}

impl From<serde_json::Error> for HeliusError {
    fn from(e: serde_json::Error) -> Self {
        HeliusError::Other(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_has_fixed_id_and_original_fields() {
        let params = serde_json::json!({"id": "some-asset"});
        let env = rpc_envelope("getAsset", &params);
        assert_eq!(env["jsonrpc"], "2.0");
        assert_eq!(env["id"], "proxy");
        assert_eq!(env["method"], "getAsset");
        assert_eq!(env["params"], params);
    }

    #[test]
    fn pubkey_validation() {
        assert!(is_pubkey("DjVE6JNiYqPL2QXyCUUh8rNjHrbz9hXHNYt99MQ59qw1").is_ok());
        assert!(is_pubkey("not-a-pubkey").is_err());
        assert!(is_pubkey("").is_err());
        // valid base58 but too short for 32 bytes
        assert!(is_pubkey("abc").is_err());
    }

    #[test]
    fn url_per_network() {
        let helius = Helius::new(reqwest::Client::new(), "key");
        assert!(helius.get_url("devnet").unwrap().contains("devnet"));
        assert!(helius.get_url("mainnet").unwrap().contains("mainnet"));
        assert!(helius.get_url("mainnet-beta").unwrap().contains("mainnet"));
        assert!(helius.get_url("localnet").is_err());
    }

    #[test]
    fn mint_request_serializes_camel_case_without_nones() {
        let req = MintCompressedNftRequest {
            name: "Foo".into(),
            symbol: "FOO".into(),
            owner: "owner".into(),
            seller_fee_basis_points: Some(500),
            ..<_>::default()
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["sellerFeeBasisPoints"], 500);
        assert!(value.get("imageUrl").is_none());
        assert!(value.get("description").is_none());
    }
}
