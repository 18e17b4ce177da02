//! Client for the mint proxy route.

use crate::{error::MintError, strategy::MintResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MintApiRequest {
    pub name: String,
    pub symbol: String,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct MintApiResponse {
    signature: String,
    asset_id: String,
}

#[derive(Deserialize, Debug)]
struct MintApiErrorBody {
    error: String,
}

/// Server-signed mint, normally backed by `POST /api/mint-cnft`.
#[async_trait]
pub trait MintApi: Send + Sync {
    async fn mint_compressed_nft(&self, request: &MintApiRequest) -> Result<MintResult, MintError>;
}

pub struct HttpMintApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpMintApi {
    pub fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl MintApi for HttpMintApi {
    async fn mint_compressed_nft(&self, request: &MintApiRequest) -> Result<MintResult, MintError> {
        let url = self
            .base_url
            .join("api/mint-cnft")
            .map_err(|e| MintError::Other(e.into()))?;
        let resp = self.client.post(url).json(request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = match resp.json::<MintApiErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            return Err(MintError::ServerMintFailed(message));
        }
        let body = resp.json::<MintApiResponse>().await?;
        Ok(MintResult {
            signature: body.signature,
            asset_id: body.asset_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_camel_case() {
        let req = MintApiRequest {
            name: "Foo".into(),
            symbol: "FOO".into(),
            owner: "Addr1".into(),
            description: None,
            image_url: Some("https://img.example/foo.png".into()),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["owner"], "Addr1");
        assert_eq!(value["imageUrl"], "https://img.example/foo.png");
        assert!(value.get("description").is_none());
    }
}
