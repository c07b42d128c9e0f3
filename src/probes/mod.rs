//! Probe catalog and verdict engine
//!
//! Seven probe kinds, each composing the transport with one or more
//! classifiers and a deterministic rule mapping classifier output and
//! transport status into a severity verdict.

mod catalog;
mod result;

pub use catalog::{is_valid_shortcode, ProbeCatalog};
pub use result::{
    preview_body, OracleItem, OracleSweep, OracleVerdict, ProbeResult, Verdict,
    INVALID_SHORTCODE, PREVIEW_MAX_CHARS, TRUNCATION_MARKER,
};
