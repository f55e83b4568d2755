/// Everything the view shows. Lives only as long as the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub address: String,
    pub connected: bool,
    /// Two-decimal score, empty when unset
    pub score: String,
    /// Set only when the scorer answered without a score
    pub no_score_message: String,
}

impl ViewState {
    pub fn set_connected(&mut self, address: String) {
        self.address = address;
        self.connected = true;
    }

    /// Every fetch starts from a blank score
    pub fn clear_score(&mut self) {
        self.score.clear();
        self.no_score_message.clear();
    }
}
