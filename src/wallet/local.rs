use async_trait::async_trait;
use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

use super::{Account, WalletProvider};
use crate::config::WalletConfig;
use crate::error::{PassportError, Result};

/// Wallet backed by a private key held in process.
///
/// Behaves like an injected browser wallet: accounts stay hidden from
/// `list_accounts` and signing is refused until `request_accounts` has been
/// approved, unless the provider starts out authorized.
#[derive(Debug)]
pub struct LocalWalletProvider {
    wallet: LocalWallet,
    authorized: AtomicBool,
}

impl LocalWalletProvider {
    pub fn new(wallet: LocalWallet, preauthorized: bool) -> Self {
        Self {
            wallet,
            authorized: AtomicBool::new(preauthorized),
        }
    }

    pub fn from_private_key(private_key: &str, preauthorized: bool) -> Result<Self> {
        let wallet = private_key.trim().parse::<LocalWallet>()?;
        Ok(Self::new(wallet, preauthorized))
    }

    /// `None` when no private key is configured
    pub fn from_config(config: &WalletConfig) -> Result<Option<Self>> {
        config
            .private_key
            .as_deref()
            .map(|key| Self::from_private_key(key, config.preauthorized))
            .transpose()
    }

    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Lowercase 0x-prefixed hex, the form wallets hand back to pages
    pub fn address_string(&self) -> String {
        format!("{:?}", self.address())
    }

    fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletProvider for LocalWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<String>> {
        self.authorized.store(true, Ordering::SeqCst);
        info!(address = %self.address_string(), "account access granted");
        Ok(vec![self.address_string()])
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        if !self.is_authorized() {
            return Ok(Vec::new());
        }
        Ok(vec![Account {
            address: self.address_string(),
        }])
    }

    async fn sign_message(&self, message: &str) -> Result<String> {
        if !self.is_authorized() {
            return Err(PassportError::Wallet(
                "account has not been connected".to_string(),
            ));
        }
        let signature = self.wallet.sign_message(message).await?;
        debug!(address = %self.address_string(), "message signed");
        Ok(format!("0x{}", signature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::Signature;
    use std::str::FromStr;

    // First default anvil/hardhat development account
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    #[tokio::test]
    async fn test_accounts_hidden_until_requested() {
        let provider = LocalWalletProvider::from_private_key(DEV_KEY, false).unwrap();
        assert_eq!(provider.address(), DEV_ADDRESS.parse::<Address>().unwrap());
        assert!(provider.list_accounts().await.unwrap().is_empty());

        let accounts = provider.request_accounts().await.unwrap();
        assert_eq!(accounts, vec![DEV_ADDRESS.to_string()]);

        let listed = provider.list_accounts().await.unwrap();
        assert_eq!(listed[0].address, DEV_ADDRESS);
    }

    #[tokio::test]
    async fn test_preauthorized_lists_account() {
        let config = WalletConfig {
            private_key: Some(DEV_KEY.to_string()),
            preauthorized: true,
        };
        let provider = LocalWalletProvider::from_config(&config).unwrap().unwrap();
        assert_eq!(provider.list_accounts().await.unwrap().len(), 1);

        assert!(LocalWalletProvider::from_config(&WalletConfig::default())
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_sign_requires_connection() {
        let provider = LocalWalletProvider::from_private_key(DEV_KEY, false).unwrap();
        let err = provider.sign_message("hello").await.unwrap_err();
        assert!(matches!(err, PassportError::Wallet(_)));
    }

    #[tokio::test]
    async fn test_signature_recovers_to_address() {
        let provider = LocalWalletProvider::from_private_key(DEV_KEY, true).unwrap();
        let message = "I hereby agree to submit my address";
        let signature = provider.sign_message(message).await.unwrap();
        assert!(signature.starts_with("0x"));
        assert_eq!(signature.len(), 2 + 65 * 2);

        let parsed = Signature::from_str(&signature).unwrap();
        let expected: Address = DEV_ADDRESS.parse().unwrap();
        assert!(parsed.verify(message, expected).is_ok());
    }

    #[test]
    fn test_bad_private_key() {
        let err = LocalWalletProvider::from_private_key("not-a-key", false).unwrap_err();
        assert!(matches!(err, PassportError::Wallet(_)));
    }
}
