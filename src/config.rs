use anyhow::{anyhow, Result};
use std::env;

const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: u16 = 8000;

/// Runtime settings read from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to (`HTTP_HOST`)
    pub http_host: String,
    /// Port the HTTP listener binds to (`HTTP_PORT`)
    pub http_port: u16,
}

impl Config {
    /// Builds the configuration from `HTTP_HOST` and `HTTP_PORT`, falling back
    /// to defaults when a variable is unset or blank.
    pub fn from_env() -> Result<Self> {
        let http_host = env::var("HTTP_HOST")
            .unwrap_or_else(|_| DEFAULT_HTTP_HOST.to_string());
        let http_host = if http_host.trim().is_empty() {
            DEFAULT_HTTP_HOST.to_string()
        } else {
            http_host.trim().to_string()
        };

        let port_str = env::var("HTTP_PORT").unwrap_or_default();
        let http_port = if port_str.trim().is_empty() {
            DEFAULT_HTTP_PORT
        } else {
            port_str
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid HTTP_PORT"))?
        };

        Ok(Config {
            http_host,
            http_port,
        })
    }

    /// `host:port` string suitable for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
