pub mod render;
pub mod state;

use tracing::{debug, error, info, warn};

use crate::api::ScorerClient;
use crate::config::PassportConfig;
use crate::error::{PassportError, Result};
use crate::models::{format_score, ScoreResponse, SigningMessage, SubmitPassportRequest, NO_SCORE_MESSAGE};
use crate::wallet::WalletProvider;

pub use render::{ScoreDisplay, ScoreGate, ViewModel};
pub use state::ViewState;

/// Controller behind the score page.
///
/// Every action takes `&mut self`, so only one is ever in flight. Failures are
/// logged and swallowed; the only failure the user sees is the no-score
/// message.
pub struct ScoreView {
    client: ScorerClient,
    wallet: Box<dyn WalletProvider>,
    state: ViewState,
}

impl ScoreView {
    pub fn new(config: PassportConfig, wallet: Box<dyn WalletProvider>) -> Result<Self> {
        Ok(Self {
            client: ScorerClient::new(config)?,
            wallet,
            state: ViewState::default(),
        })
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn config(&self) -> &PassportConfig {
        self.client.config()
    }

    pub fn render(&self) -> ViewModel {
        ViewModel::from_state(&self.state, self.config().threshold)
    }

    /// Pick up an account the wallet already exposes and load its score
    #[tracing::instrument(skip(self))]
    pub async fn mount(&mut self) {
        let accounts = match self.wallet.list_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                warn!(error = %e, "Failed to list wallet accounts");
                return;
            }
        };

        match accounts.into_iter().next() {
            Some(account) => {
                info!(address = %account.address, "Wallet already connected");
                self.state.set_connected(account.address.clone());
                self.check_passport(Some(&account.address)).await;
            }
            None => debug!("Wallet exposes no accounts"),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn connect(&mut self) {
        match self.request_first_account().await {
            Ok(address) => {
                info!(address = %address, "Wallet connected");
                self.state.set_connected(address.clone());
                self.check_passport(Some(&address)).await;
            }
            Err(e) => error!(error = %e, "Failed to connect wallet"),
        }
    }

    /// Re-fetch the score for `address`, or the connected address when `None`
    #[tracing::instrument(skip(self))]
    pub async fn check_passport(&mut self, address: Option<&str>) {
        self.state.clear_score();

        let address = match address.filter(|a| !a.is_empty()) {
            Some(address) => address.to_string(),
            None if !self.state.address.is_empty() => self.state.address.clone(),
            None => {
                warn!("No address to check");
                return;
            }
        };

        match self.client.get_score(&address).await {
            Ok(response) => self.apply_score(response),
            Err(e) => error!(address = %address, error = %e, "Failed to fetch passport score"),
        }
    }

    /// Look up an address other than the connected one. Without a connected
    /// wallet the page has nowhere to show the result, so nothing is fetched.
    pub async fn check_address(&mut self, address: &str) -> Result<()> {
        if !self.state.connected {
            return Err(PassportError::NotConnected);
        }
        self.check_passport(Some(address)).await;
        Ok(())
    }

    pub async fn get_signing_message(&self) -> Option<SigningMessage> {
        match self.client.get_signing_message().await {
            Ok(signing) => Some(signing),
            Err(e) => {
                error!(error = %e, "Failed to fetch signing message");
                None
            }
        }
    }

    /// Sign the scorer's challenge and resubmit the passport for scoring
    #[tracing::instrument(skip(self))]
    pub async fn submit_passport(&mut self) {
        self.state.no_score_message.clear();

        match self.try_submit_passport().await {
            Ok(reply) => info!(response = %reply, "Passport submitted"),
            Err(e) => error!(error = %e, "Passport submission failed"),
        }
    }

    async fn request_first_account(&self) -> Result<String> {
        let accounts = self.wallet.request_accounts().await?;
        accounts.into_iter().next().ok_or(PassportError::NoAccounts)
    }

    fn apply_score(&mut self, response: ScoreResponse) {
        if let Some(err) = response.error.as_deref() {
            warn!(error = %err, "Scorer reported an error");
        }

        match response.score {
            Some(score) => {
                self.state.score = format_score(score);
                info!(score = %self.state.score, "Passport score loaded");
            }
            None => {
                self.state.no_score_message = NO_SCORE_MESSAGE.to_string();
                info!("No score available");
            }
        }
    }

    async fn try_submit_passport(&self) -> Result<serde_json::Value> {
        if !self.state.connected || self.state.address.is_empty() {
            return Err(PassportError::NotConnected);
        }

        let signing = self
            .get_signing_message()
            .await
            .ok_or(PassportError::MissingSigningMessage)?;
        let signature = self.wallet.sign_message(&signing.message).await?;

        let request = SubmitPassportRequest {
            address: self.state.address.clone(),
            scorer_id: self.config().scorer_id.clone(),
            signature,
            nonce: signing.nonce,
        };
        self.client.submit_passport(&request).await
    }
}
