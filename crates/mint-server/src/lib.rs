use actix_cors::Cors;

pub mod api;
pub mod error;

/// Server configuration, read from the environment once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub solana_network: String,
    /// Server-held Helius key; never reaches the browser.
    pub helius_secret_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            cors_origins: Vec::new(),
            solana_network: Self::default_network(),
            helius_secret_key: None,
        }
    }
}

impl Config {
    pub fn default_host() -> String {
        "127.0.0.1".to_owned()
    }

    pub fn default_port() -> u16 {
        8080
    }

    pub fn default_network() -> String {
        "devnet".to_owned()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: get("HOST").unwrap_or_else(Self::default_host),
            port: get("PORT")
                .and_then(|s| match s.parse() {
                    Ok(port) => Some(port),
                    Err(error) => {
                        tracing::warn!("invalid PORT ({}), using default", error);
                        None
                    }
                })
                .unwrap_or_else(Self::default_port),
            cors_origins: get("CORS_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
            solana_network: get("SOLANA_NETWORK").unwrap_or_else(Self::default_network),
            helius_secret_key: get("HELIUS_SECRET_KEY").filter(|s| !s.is_empty()),
        }
    }

    pub fn cors(&self) -> Cors {
        let mut cors = Cors::default()
            .allow_any_header()
            .allow_any_method()
            .max_age(3600);
        if self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*") {
            cors = cors.allow_any_origin().send_wildcard();
        } else {
            for origin in &self.cors_origins {
                cors = cors.allowed_origin(origin);
            }
        }
        cors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        Config::from_lookup(|key| map.get(key).map(|s| (*s).to_owned()))
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.solana_network, "devnet");
        assert!(config.helius_secret_key.is_none());
    }

    #[test]
    fn cors_origins_split_and_trimmed() {
        let config = config_from(&[(
            "CORS_ORIGINS",
            "https://a.example, https://b.example ,",
        )]);
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn invalid_port_falls_back() {
        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.port, 8080);
    }
}
