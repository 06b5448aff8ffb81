use std::env;

#[derive(Clone)]
pub struct Config {
    pub testnet: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let testnet = env::var("HYPERLIQUID_TESTNET")
            .map(|v| v == "true")
            .unwrap_or(false);

        Self { testnet }
    }
}
