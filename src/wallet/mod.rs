use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{PassportError, Result};

pub mod local;

pub use local::LocalWalletProvider;

/// An account the wallet has exposed to the app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: String,
}

/// What the view needs from a wallet: account access and personal-message signing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the user to expose their accounts. Fails if they decline.
    async fn request_accounts(&self) -> Result<Vec<String>>;

    /// Accounts already exposed, without prompting. Empty before a connect.
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    /// EIP-191 signature over `message`, 0x-prefixed hex
    async fn sign_message(&self, message: &str) -> Result<String>;
}

/// Stands in for a browser without a wallet extension
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingWallet;

#[async_trait]
impl WalletProvider for MissingWallet {
    async fn request_accounts(&self) -> Result<Vec<String>> {
        Err(PassportError::Wallet("no wallet installed".to_string()))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        Err(PassportError::Wallet("no wallet installed".to_string()))
    }

    async fn sign_message(&self, _message: &str) -> Result<String> {
        Err(PassportError::Wallet("no wallet installed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_wallet_rejects_everything() {
        let wallet = MissingWallet;
        assert!(matches!(wallet.request_accounts().await, Err(PassportError::Wallet(_))));
        assert!(matches!(wallet.list_accounts().await, Err(PassportError::Wallet(_))));
        assert!(matches!(wallet.sign_message("hi").await, Err(PassportError::Wallet(_))));
    }
}
