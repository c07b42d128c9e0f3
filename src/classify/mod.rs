//! Response classifiers
//!
//! Pure functions over a probe response body. Classifier output feeds the
//! per-probe verdict rules; nothing here touches the network or fails the
//! caller.

pub mod heuristics;
pub mod json;

pub use heuristics::{has_leaky_keywords, missing_login_wall};
pub use json::{analyze_json, JsonMeta};
