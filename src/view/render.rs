use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use super::state::ViewState;

pub const TITLE: &str = "Gitcoin passport scorer";
pub const DASHBOARD_URL: &str = "https://passport.gitcoin.co/#/dashboard";
pub const CONGRATULATIONS_MESSAGE: &str = "Congratulations, you can view this secret message!";
pub const SORRY_MESSAGE: &str = "Sorry, your score is not high enough to view the secret message.";

/// Which side of the threshold a score falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreGate {
    Congratulations,
    Sorry,
}

impl ScoreGate {
    pub fn for_score(score: Decimal, threshold: Decimal) -> Self {
        if score >= threshold {
            ScoreGate::Congratulations
        } else {
            ScoreGate::Sorry
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreDisplay {
    /// Nothing fetched yet, or the last fetch failed
    Pending,
    NoScore(String),
    Scored { score: String, gate: ScoreGate },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewModel {
    Disconnected,
    Connected { address: String, score: ScoreDisplay },
}

impl ViewModel {
    pub fn from_state(state: &ViewState, threshold: Decimal) -> Self {
        if !state.connected {
            return ViewModel::Disconnected;
        }

        let score = if !state.no_score_message.is_empty() {
            ScoreDisplay::NoScore(state.no_score_message.clone())
        } else {
            match Decimal::from_str(&state.score) {
                Ok(value) => ScoreDisplay::Scored {
                    score: state.score.clone(),
                    gate: ScoreGate::for_score(value, threshold),
                },
                Err(_) => ScoreDisplay::Pending,
            }
        };

        ViewModel::Connected {
            address: state.address.clone(),
            score,
        }
    }

    pub fn gate(&self) -> Option<ScoreGate> {
        match self {
            ViewModel::Connected {
                score: ScoreDisplay::Scored { gate, .. },
                ..
            } => Some(*gate),
            _ => None,
        }
    }
}

impl fmt::Display for ViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TITLE)?;
        writeln!(f, "Configure your passport here: {}", DASHBOARD_URL)?;
        writeln!(f, "Submit passport again to recalculate score.")?;

        match self {
            ViewModel::Disconnected => write!(f, "[Connect your wallet]"),
            ViewModel::Connected { address, score } => {
                writeln!(f, "Connected: {}", address)?;
                writeln!(f, "[Submit Passport] [Check passport score]")?;
                match score {
                    ScoreDisplay::Pending => write!(f, "No score loaded yet."),
                    ScoreDisplay::NoScore(message) => write!(f, "{}", message),
                    ScoreDisplay::Scored { score, gate } => {
                        writeln!(f, "Your passport score is {}", score)?;
                        match gate {
                            ScoreGate::Congratulations => write!(f, "{}", CONGRATULATIONS_MESSAGE),
                            ScoreGate::Sorry => write!(f, "{}", SORRY_MESSAGE),
                        }
                    }
                }
            }
        }
    }
}
