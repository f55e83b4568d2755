use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

use crate::error::{PassportError, Result};

pub const DEFAULT_SCORE_ENDPOINT: &str = "https://api.scorer.gitcoin.co/registry/score";
pub const DEFAULT_SIGNING_MESSAGE_ENDPOINT: &str =
    "https://api.scorer.gitcoin.co/registry/signing-message";
pub const DEFAULT_SUBMIT_ENDPOINT: &str = "https://api.scorer.gitcoin.co/registry/submit-passport";

/// Score needed to reveal the hidden message
pub const THRESHOLD_NUMBER: u32 = 20;

/// Settings for the score view, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct PassportConfig {
    /// When unset no custom headers are sent with any request
    pub api_key: Option<String>,
    pub scorer_id: String,
    pub score_endpoint: String,
    pub sign_endpoint: String,
    pub submit_endpoint: String,
    pub threshold: Decimal,
    pub timeout_ms: Option<u64>,
}

impl PassportConfig {
    pub fn new(api_key: Option<String>, scorer_id: impl Into<String>) -> Self {
        Self {
            api_key,
            scorer_id: scorer_id.into(),
            score_endpoint: DEFAULT_SCORE_ENDPOINT.to_string(),
            sign_endpoint: DEFAULT_SIGNING_MESSAGE_ENDPOINT.to_string(),
            submit_endpoint: DEFAULT_SUBMIT_ENDPOINT.to_string(),
            threshold: Decimal::from(THRESHOLD_NUMBER),
            timeout_ms: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let scorer_id = non_empty("PASSPORT_SCORER_ID")
            .ok_or_else(|| PassportError::Config("PASSPORT_SCORER_ID is not set".to_string()))?;

        let threshold = match non_empty("PASSPORT_THRESHOLD") {
            Some(raw) => Decimal::from_str(raw.trim()).map_err(|e| {
                PassportError::Config(format!("PASSPORT_THRESHOLD is not a number: {}", e))
            })?,
            None => Decimal::from(THRESHOLD_NUMBER),
        };

        let timeout_ms = match non_empty("PASSPORT_HTTP_TIMEOUT_MS") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                PassportError::Config(format!("PASSPORT_HTTP_TIMEOUT_MS is invalid: {}", e))
            })?),
            None => None,
        };

        Ok(Self {
            api_key: non_empty("PASSPORT_API_KEY"),
            scorer_id,
            score_endpoint: non_empty("PASSPORT_SCORE_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_SCORE_ENDPOINT.to_string()),
            sign_endpoint: non_empty("PASSPORT_SIGNING_MESSAGE_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_SIGNING_MESSAGE_ENDPOINT.to_string()),
            submit_endpoint: non_empty("PASSPORT_SUBMIT_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_SUBMIT_ENDPOINT.to_string()),
            threshold,
            timeout_ms,
        })
    }
}

/// Where the local signer comes from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletConfig {
    pub private_key: Option<String>,
    /// Account is already exposed to the app, so mount sees it without a connect
    pub preauthorized: bool,
}

impl WalletConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            private_key: lookup("WALLET_PRIVATE_KEY").filter(|v| !v.trim().is_empty()),
            preauthorized: lookup("WALLET_PREAUTHORIZED")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_scorer_id() {
        let config = PassportConfig::from_lookup(lookup_from(&[("PASSPORT_SCORER_ID", "335")]))
            .unwrap();

        assert_eq!(config, PassportConfig::new(None, "335"));
        assert_eq!(config.threshold, dec!(20));
        assert_eq!(config.score_endpoint, DEFAULT_SCORE_ENDPOINT);
    }

    #[test]
    fn test_missing_scorer_id_is_an_error() {
        let err = PassportConfig::from_lookup(lookup_from(&[("PASSPORT_API_KEY", "key")]))
            .unwrap_err();
        assert!(matches!(err, PassportError::Config(_)));
    }

    #[test]
    fn test_empty_api_key_disables_header() {
        let config = PassportConfig::from_lookup(lookup_from(&[
            ("PASSPORT_SCORER_ID", "1"),
            ("PASSPORT_API_KEY", ""),
        ]))
        .unwrap();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_overrides() {
        let config = PassportConfig::from_lookup(lookup_from(&[
            ("PASSPORT_SCORER_ID", "7"),
            ("PASSPORT_API_KEY", "abc"),
            ("PASSPORT_SCORE_ENDPOINT", "http://localhost/score"),
            ("PASSPORT_SIGNING_MESSAGE_ENDPOINT", "http://localhost/sign"),
            ("PASSPORT_SUBMIT_ENDPOINT", "http://localhost/submit"),
            ("PASSPORT_THRESHOLD", "15.5"),
            ("PASSPORT_HTTP_TIMEOUT_MS", "2500"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.sign_endpoint, "http://localhost/sign");
        assert_eq!(config.submit_endpoint, "http://localhost/submit");
        assert_eq!(config.threshold, dec!(15.5));
        assert_eq!(config.timeout_ms, Some(2500));
    }

    #[test]
    fn test_invalid_threshold() {
        let err = PassportConfig::from_lookup(lookup_from(&[
            ("PASSPORT_SCORER_ID", "7"),
            ("PASSPORT_THRESHOLD", "twenty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, PassportError::Config(_)));
    }

    #[test]
    fn test_wallet_config() {
        let config = WalletConfig::from_lookup(lookup_from(&[
            ("WALLET_PRIVATE_KEY", "0xabc"),
            ("WALLET_PREAUTHORIZED", "TRUE"),
        ]));
        assert_eq!(config.private_key.as_deref(), Some("0xabc"));
        assert!(config.preauthorized);

        assert_eq!(WalletConfig::from_lookup(|_| None), WalletConfig::default());
    }
}
