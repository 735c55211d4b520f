use std::env;

use crate::gateway::GatewayConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub base_url: String,
    pub gateway: GatewayConfig,
    pub dev_mode: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let dev_mode = env::var("HIREBASE_ENV")
            .map(|v| v == "dev" || v == "development")
            .unwrap_or(false);

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));

        let gateway = GatewayConfig {
            server_key: env::var("GATEWAY_SERVER_KEY").unwrap_or_default(),
            base_url: env::var("GATEWAY_BASE_URL")
                .unwrap_or_else(|_| "https://app.sandbox.midtrans.com/snap/v1".to_string()),
        };

        Self {
            host,
            port,
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "hirebase.db".to_string()),
            base_url,
            gateway,
            dev_mode,
        }
    }

    /// Outside dev mode the gateway server key is mandatory: an empty key
    /// would make every notification signature verify against "".
    pub fn validate(&self) -> Result<(), String> {
        if !self.dev_mode && self.gateway.server_key.is_empty() {
            return Err("GATEWAY_SERVER_KEY must be set outside dev mode".to_string());
        }
        Ok(())
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dev_mode: bool, server_key: &str) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_path: "hirebase.db".to_string(),
            base_url: "http://127.0.0.1:3000".to_string(),
            gateway: GatewayConfig {
                server_key: server_key.to_string(),
                base_url: "https://app.sandbox.midtrans.com/snap/v1".to_string(),
            },
            dev_mode,
        }
    }

    #[test]
    fn test_empty_server_key_rejected_outside_dev_mode() {
        let err = config(false, "").validate().unwrap_err();
        assert!(err.contains("GATEWAY_SERVER_KEY"));
    }

    #[test]
    fn test_empty_server_key_tolerated_in_dev_mode() {
        assert!(config(true, "").validate().is_ok());
    }

    #[test]
    fn test_set_server_key_always_valid() {
        assert!(config(false, "sk-live").validate().is_ok());
        assert!(config(true, "sk-dev").validate().is_ok());
    }
}
