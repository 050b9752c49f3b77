//! Model response handling
//!
//! Raw model text goes through [`extract_json`] to isolate the payload, then
//! [`parse_and_normalize`] to produce a typed record with metadata and a
//! guaranteed text report.

mod extract;
mod normalize;

pub use extract::{extract_json, recover_object};
pub use normalize::{
    format_timestamp, parse_and_normalize, parse_object, parse_response, StageRecord,
};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The model output holds no recoverable JSON object
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}
