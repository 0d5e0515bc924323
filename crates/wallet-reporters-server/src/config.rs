use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Admin keys that MUST NOT be used.
const PLACEHOLDER_ADMIN_KEYS: &[&str] = &["change-me", "dev-admin-key-change-me"];

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub db_path: PathBuf,
    pub admin_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("REPORTERS_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("REPORTERS_PORT")
            .unwrap_or_else(|| "8787".into())
            .parse()
            .context("REPORTERS_PORT is not a valid port")?;
        let db_path: PathBuf = lookup("REPORTERS_DB_PATH")
            .unwrap_or_else(|| "wallet-reporters.db".into())
            .into();
        let admin_key = lookup("REPORTERS_ADMIN_KEY").filter(|k| !k.is_empty());

        if let Some(key) = &admin_key {
            if PLACEHOLDER_ADMIN_KEYS.contains(&key.as_str()) {
                bail!("REPORTERS_ADMIN_KEY is still a placeholder; set a real secret");
            }
        }

        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", host, port))?;

        Ok(Self {
            addr,
            db_path,
            admin_key,
        })
    }
}
