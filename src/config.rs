use std::env;
use std::net::SocketAddr;

use crate::error::{invalid_input_error, Error};

pub const DEFAULT_API_BASE: &str = "maps.googleapis.com";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base: String,
    pub api_key: String,
    pub addr: SocketAddr,
}

impl Config {
    /// Reads `GOOGLE_MAPS_API_BASE`, `GOOGLE_MAPS_API_KEY` and `PINROUTE_ADDR`.
    /// Only the key is required.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = env::var("GOOGLE_MAPS_API_KEY")?;
        let api_base = env::var("GOOGLE_MAPS_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
        let addr = env::var("PINROUTE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.into());

        Self::new(api_base, api_key, &addr)
    }

    pub fn new(api_base: String, api_key: String, addr: &str) -> Result<Self, Error> {
        let addr = addr.parse().map_err(|_| invalid_input_error())?;

        Ok(Self {
            api_base,
            api_key,
            addr,
        })
    }
}

#[test]
fn config_rejects_bad_addr() {
    let result = Config::new(DEFAULT_API_BASE.into(), "key".into(), "not an address");
    assert_eq!(result.unwrap_err(), invalid_input_error());
}

#[test]
fn config_parses_default_addr() {
    let config = Config::new(DEFAULT_API_BASE.into(), "key".into(), DEFAULT_ADDR).unwrap();
    assert_eq!(config.addr.port(), 3000);
}
