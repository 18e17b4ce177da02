use actix_web::{App, HttpServer, middleware::Logger, web};
use futures_util::future::ok;
use helius_client::Helius;
use mint_server::{
    Config,
    api::{self, prelude::Success},
};
use std::convert::Infallible;

#[actix_web::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let Some(apikey) = config.helius_secret_key.clone() else {
        tracing::error!("HELIUS_SECRET_KEY is not set");
        return;
    };
    let helius = web::Data::new(Helius::new(reqwest::Client::new(), &apikey));

    let host = config.host.clone();
    let port = config.port;
    tracing::info!("listening on {:?} port {:?}", host, port);
    tracing::info!("proxying to helius {}", config.solana_network);

    let server = HttpServer::new(move || {
        let api = web::scope("/api")
            .service(api::rpc_proxy::service(&config, helius.clone()))
            .service(api::mint_cnft::service(&config, helius.clone()));

        let healthcheck = web::resource("/healthcheck")
            .route(web::get().to(|()| ok::<_, Infallible>(web::Json(Success))));

        App::new()
            .wrap(Logger::new(r#""%r" %s %b %Dms"#).exclude("/healthcheck"))
            .app_data(web::Data::new(config.clone()))
            .service(api)
            .service(healthcheck)
    })
    .bind((host.as_str(), port));

    let server = match server {
        Ok(server) => server,
        Err(error) => {
            tracing::error!("failed to bind {}:{}: {}", host, port, error);
            return;
        }
    };

    if let Err(error) = server.run().await {
        tracing::error!("server error: {}", error);
    }
}
