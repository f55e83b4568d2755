pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;
pub mod view;
pub mod wallet;

// Re-export commonly used types
pub use api::ScorerClient;

pub use config::{PassportConfig, WalletConfig};

pub use error::{PassportError, Result};

pub use models::{
    format_score, ScoreResponse, SigningMessage, SubmitPassportRequest,
    NO_SCORE_MESSAGE,
};

pub use view::{ScoreDisplay, ScoreGate, ScoreView, ViewModel, ViewState};

pub use wallet::{Account, LocalWalletProvider, MissingWallet, WalletProvider};
