pub mod client;

pub use client::{ScorerClient, API_KEY_HEADER};
