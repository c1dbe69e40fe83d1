use std::env;

use anyhow::{bail, Context};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub mongo_url: String,
    pub mongo_database: String,
    pub store_backend: StoreBackend,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value {port:?}"))?,
            None => 9000,
        };

        let store_backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("mongodb") => StoreBackend::MongoDb,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("unknown STORE_BACKEND {other:?}"),
        };

        Ok(Settings {
            host: lookup("HOST").unwrap_or("0.0.0.0".to_string()),
            port,
            mongo_url: lookup("MONGO_URL").unwrap_or("mongodb://localhost:27017".to_string()),
            mongo_database: lookup("MONGO_DATABASE").unwrap_or("messenger".to_string()),
            store_backend,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
