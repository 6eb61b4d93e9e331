//! JSON API for embedding hosts.

pub mod json_api;

pub use json_api::{simulate_match, simulate_match_json, EventRecord, MatchRequest, MatchResponse};
