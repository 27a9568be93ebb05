//! Tool parameter decoding.
//!
//! Tools receive a JSON object. Some also accept a bare string as shorthand for their
//! primary query field; those implement [`QueryShorthand`].

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub trait QueryShorthand {
    fn from_query(query: String) -> Self;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ToolInput<P> {
    Query(String),
    Params(P),
}

impl<P: QueryShorthand> ToolInput<P> {
    pub fn normalize(self) -> P {
        match self {
            ToolInput::Query(q) => P::from_query(q),
            ToolInput::Params(p) => p,
        }
    }
}

impl<P: DeserializeOwned + Default> ToolInput<P> {
    /// JSON object, JSON string, or (when not JSON at all) raw text. Empty input is `P::default()`.
    pub fn from_raw(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(ToolInput::Params(P::default()));
        }
        match serde_json::from_str::<ToolInput<P>>(raw) {
            Ok(input) => Ok(input),
            Err(_) if !raw.starts_with('{') => Ok(ToolInput::Query(raw.to_string())),
            Err(e) => Err(e).context("tool parameters must be a JSON object or a string"),
        }
    }
}

/// Object-only decoding for tools without a string shorthand. Empty input is `{}`.
pub fn parse_params<P: DeserializeOwned>(raw: &str) -> Result<P> {
    let raw = raw.trim();
    let raw = if raw.is_empty() { "{}" } else { raw };
    serde_json::from_str(raw).context("tool parameters must be a JSON object")
}
