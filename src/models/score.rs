use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Shown in place of a score when the scorer has nothing for the address
pub const NO_SCORE_MESSAGE: &str =
    "No score available, please add stamps to your passport and then resubmit.";

/// Response from `GET /registry/score/{scorer_id}/{address}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreResponse {
    #[serde(default)]
    pub address: Option<String>,
    /// The registry sends the score as a string ("17.456000000"), older scorers as a number
    #[serde(default, deserialize_with = "deserialize_score")]
    pub score: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_score_timestamp: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Challenge returned by the signing-message endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningMessage {
    pub message: String,
    pub nonce: String,
}

/// Body for the submit-passport endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitPassportRequest {
    pub address: String,
    pub scorer_id: String,
    pub signature: String,
    pub nonce: String,
}

/// Round half away from zero to 2 places and always print both decimals
pub fn format_score(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Numeric view of a JSON score field. Anything that is not a number or a
/// numeric string counts as no score.
pub fn score_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .or_else(|| underflow_to_zero(raw))
}

/// Finite values below `Decimal`'s smallest step still display as 0.00.
/// Values above `Decimal::MAX` stay unrepresentable.
fn underflow_to_zero(raw: &str) -> Option<Decimal> {
    let value = raw.parse::<f64>().ok()?;
    (value.is_finite() && value.abs() < 1e-28).then_some(Decimal::ZERO)
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(score_from_value))
}
