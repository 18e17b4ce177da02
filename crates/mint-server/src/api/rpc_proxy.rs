use super::prelude::*;
use actix_web::HttpResponse;
use helius_client::Helius;
use serde_json::Value as JsonValue;

#[derive(Deserialize, Debug)]
pub struct Params {
    pub method: Option<String>,
    #[serde(default)]
    pub params: JsonValue,
}

#[derive(Serialize)]
struct Probe {
    status: &'static str,
}

pub fn service(config: &Config, helius: web::Data<Helius>) -> impl HttpServiceFactory + 'static {
    web::resource("/helius")
        .app_data(helius)
        .wrap(config.cors())
        .route(web::post().to(rpc_proxy))
        .route(web::get().to(probe))
}

async fn probe() -> web::Json<Probe> {
    web::Json(Probe {
        status: "helius proxy endpoint",
    })
}

/// Single-shot forward: wrap the payload in the JSON-RPC envelope and hand
/// the upstream status, content-type and body back untouched.
async fn rpc_proxy(
    params: web::Json<Params>,
    helius: web::Data<Helius>,
    config: web::Data<Config>,
) -> Result<HttpResponse, Error> {
    let Params { method, params } = params.into_inner();
    let method = method
        .filter(|m| !m.is_empty())
        .ok_or_else(|| Error::InvalidRequest("missing field: method".to_owned()))?;

    let resp = helius
        .rpc_request(&config.solana_network, &method, params)
        .await
        .map_err(Error::Other)?;

    let status = StatusCode::from_u16(resp.status().as_u16())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_owned();
    let body = resp.bytes().await?;
    Ok(HttpResponse::build(status).content_type(content_type).body(body))
}
