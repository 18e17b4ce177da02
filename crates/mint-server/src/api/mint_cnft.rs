use super::prelude::*;
use helius_client::{Helius, MintCompressedNftRequest, is_pubkey};
use serde_json::Value as JsonValue;

/// Creator royalty applied to every hosted mint, in basis points.
pub const ROYALTY_BASIS_POINTS: u16 = 500;

const PLACEHOLDER_IMAGE: &str = "https://placehold.co/512x512.png";

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub owner: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub attributes: Option<JsonValue>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    pub signature: String,
    pub asset_id: String,
}

#[derive(Serialize)]
struct Probe {
    status: &'static str,
}

pub fn service(config: &Config, helius: web::Data<Helius>) -> impl HttpServiceFactory + 'static {
    web::resource("/mint-cnft")
        .app_data(helius)
        .wrap(config.cors())
        .route(web::post().to(mint_cnft))
        .route(web::get().to(probe))
}

async fn probe() -> web::Json<Probe> {
    web::Json(Probe {
        status: "mint-cnft endpoint",
    })
}

fn validate(params: &Params) -> Result<(), Error> {
    for (field, value) in [
        ("name", &params.name),
        ("symbol", &params.symbol),
        ("owner", &params.owner),
    ] {
        if value.trim().is_empty() {
            return Err(Error::InvalidRequest(format!("missing field: {field}")));
        }
    }
    is_pubkey(&params.owner)
        .map_err(|_| Error::InvalidRequest(format!("invalid owner address: {}", params.owner)))?;
    Ok(())
}

fn apply_defaults(params: Params) -> MintCompressedNftRequest {
    MintCompressedNftRequest {
        description: Some(
            params
                .description
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| format!("{}, a compressed NFT", params.name)),
        ),
        image_url: Some(params.image_url.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned())),
        attributes: Some(params.attributes.unwrap_or_else(|| JsonValue::Array(Vec::new()))),
        seller_fee_basis_points: Some(ROYALTY_BASIS_POINTS),
        name: params.name,
        symbol: params.symbol,
        owner: params.owner,
    }
}

async fn mint_cnft(
    params: web::Json<Params>,
    helius: web::Data<Helius>,
    config: web::Data<Config>,
) -> Result<web::Json<Output>, Error> {
    let params = params.into_inner();
    validate(&params)?;
    let request = apply_defaults(params);

    let resp = helius
        .mint_compressed_nft(&config.solana_network, request)
        .await?;
    Ok(web::Json(Output {
        signature: resp.signature,
        asset_id: resp.asset_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test as actix_test};

    const OWNER: &str = "DjVE6JNiYqPL2QXyCUUh8rNjHrbz9hXHNYt99MQ59qw1";

    macro_rules! test_app {
        () => {{
            let config = Config::default();
            let helius = web::Data::new(Helius::new(reqwest::Client::new(), "test-key"));
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(config.clone()))
                    .service(web::scope("/api").service(service(&config, helius))),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn get_probe_returns_liveness_payload() {
        let app = test_app!();
        let req = actix_test::TestRequest::get().uri("/api/mint-cnft").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["status"], "mint-cnft endpoint");
    }

    #[actix_web::test]
    async fn missing_required_fields_are_rejected() {
        let app = test_app!();
        for body in [
            serde_json::json!({ "symbol": "FOO", "owner": OWNER }),
            serde_json::json!({ "name": "Foo", "owner": OWNER }),
            serde_json::json!({ "name": "Foo", "symbol": "FOO" }),
        ] {
            let req = actix_test::TestRequest::post()
                .uri("/api/mint-cnft")
                .set_json(body)
                .to_request();
            let resp = actix_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: serde_json::Value = actix_test::read_body_json(resp).await;
            assert!(body["error"].as_str().unwrap().contains("missing field"));
        }
    }

    #[actix_web::test]
    async fn malformed_owner_is_rejected() {
        let app = test_app!();
        let req = actix_test::TestRequest::post()
            .uri("/api/mint-cnft")
            .set_json(serde_json::json!({
                "name": "Foo",
                "symbol": "FOO",
                "owner": "not-a-pubkey",
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn defaults_fill_the_optional_fields() {
        let request = apply_defaults(Params {
            name: "Foo".to_owned(),
            symbol: "FOO".to_owned(),
            owner: OWNER.to_owned(),
            ..Params::default()
        });
        assert_eq!(request.description.as_deref(), Some("Foo, a compressed NFT"));
        assert_eq!(request.image_url.as_deref(), Some(PLACEHOLDER_IMAGE));
        assert_eq!(request.attributes, Some(serde_json::json!([])));
        assert_eq!(request.seller_fee_basis_points, Some(ROYALTY_BASIS_POINTS));
    }

    #[test]
    fn explicit_fields_are_kept() {
        let request = apply_defaults(Params {
            name: "Foo".to_owned(),
            symbol: "FOO".to_owned(),
            owner: OWNER.to_owned(),
            description: Some("hand-written".to_owned()),
            image_url: Some("https://img.example/foo.png".to_owned()),
            attributes: Some(serde_json::json!([{ "trait_type": "color", "value": "red" }])),
        });
        assert_eq!(request.description.as_deref(), Some("hand-written"));
        assert_eq!(request.image_url.as_deref(), Some("https://img.example/foo.png"));
    }

    #[test]
    fn validation_runs_before_any_upstream_call() {
        // validate() is the first thing the handler does; a failing request
        // never reaches the Helius client.
        let err = validate(&Params::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }
}
