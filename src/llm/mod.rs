//! Language-model integration for survivor decisions

pub mod client;
pub mod context;
pub mod oracle;
pub mod parser;

pub use client::LlmClient;
pub use context::ColonyContext;
pub use oracle::LlmOracle;
pub use parser::{extract_json, parse_decision};
