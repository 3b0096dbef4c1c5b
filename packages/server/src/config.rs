//! Server configuration, populated from environment variables.

use std::net::SocketAddr;

/// Runtime configuration for a hypertodo server.
///
/// All fields are populated from environment variables with sensible
/// defaults, so the server can be started with zero configuration.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `HYPERTODO_BIND` | `127.0.0.1:5000` | TCP socket address to listen on |
/// | `HYPERTODO_PUBLIC_URL` | derived from `HYPERTODO_BIND` | Base URL used in every link handed to clients |
/// | `HYPERTODO_SEED` | `true` | Start with the three demo todos |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,

    /// Externally visible root URL, without a trailing slash.
    /// Example: `"http://localhost:5000"`.
    pub public_url: String,

    /// Whether the store starts with the demo data set.
    pub seed: bool,
}

impl ServerConfig {
    pub const DEFAULT_BIND: &'static str = "127.0.0.1:5000";

    /// Populate config from environment variables, applying defaults where absent.
    ///
    /// Fails if `HYPERTODO_BIND` is not a socket address.
    pub fn from_env() -> Result<Self, String> {
        let raw_bind =
            std::env::var("HYPERTODO_BIND").unwrap_or_else(|_| Self::DEFAULT_BIND.into());
        let bind_addr: SocketAddr = raw_bind.parse().map_err(|e| {
            format!("HYPERTODO_BIND must be a valid socket address (e.g. 127.0.0.1:5000), got {raw_bind:?}: {e}")
        })?;

        let public_url = std::env::var("HYPERTODO_PUBLIC_URL")
            .unwrap_or_else(|_| format!("http://{bind_addr}"));

        let seed = std::env::var("HYPERTODO_SEED")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        Ok(Self::new(bind_addr, public_url, seed))
    }

    pub fn new(bind_addr: SocketAddr, public_url: impl Into<String>, seed: bool) -> Self {
        Self {
            bind_addr,
            public_url: public_url.into().trim_end_matches('/').to_string(),
            seed,
        }
    }
}

/// `0`, `false`, `no` and `off` (any case) are false; anything else is true.
fn parse_flag(v: &str) -> bool {
    !matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("1"));
        assert!(parse_flag("true"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("False"));
        assert!(!parse_flag(" off "));
    }

    #[test]
    fn public_url_loses_trailing_slash() {
        let cfg = ServerConfig::new("127.0.0.1:5000".parse().unwrap(), "http://todo.example/", true);
        assert_eq!(cfg.public_url, "http://todo.example");
    }
}
