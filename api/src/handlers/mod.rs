//! Translation of flow outcomes and request errors into HTTP responses

pub mod response;

pub use response::{json_config, outcome_response, request_id, validation_response};
