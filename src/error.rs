use thiserror::Error;

#[derive(Error, Debug)]
pub enum PassportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Wallet returned no accounts")]
    NoAccounts,

    #[error("No wallet address connected")]
    NotConnected,

    #[error("Signing message unavailable")]
    MissingSigningMessage,
}

impl From<reqwest::Error> for PassportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_body() || err.is_decode() {
            return PassportError::Decode(err.to_string());
        }
        PassportError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for PassportError {
    fn from(err: serde_json::Error) -> Self {
        PassportError::Decode(err.to_string())
    }
}

impl From<ethers::signers::WalletError> for PassportError {
    fn from(err: ethers::signers::WalletError) -> Self {
        PassportError::Wallet(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PassportError>;
