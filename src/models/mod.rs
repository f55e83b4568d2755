pub mod score;


pub use score::{
    format_score, score_from_value, ScoreResponse, SigningMessage, SubmitPassportRequest,
    NO_SCORE_MESSAGE,
};
