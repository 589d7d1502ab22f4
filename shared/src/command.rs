//! Sentinel command protocol between the assistant model and the client
//!
//! The model answers either with conversational text or with exactly one
//! bracketed command at the very start of its reply:
//! - `[SHOW_GRAPH:<district>]` - chart the district's history
//! - `[PREDICT:<district>]` - run a one-year-ahead forecast
//!
//! Prefixes are literal and case-sensitive. Downstream code only ever sees
//! the parsed [`Intent`].

use serde::{Deserialize, Serialize};

pub const SHOW_GRAPH_PREFIX: &str = "[SHOW_GRAPH:";
pub const PREDICT_PREFIX: &str = "[PREDICT:";

/// Classified purpose of a model reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    ShowGraph { district: String },
    Predict { district: String },
    PlainText { text: String },
}

impl Intent {
    pub fn district(&self) -> Option<&str> {
        match self {
            Intent::ShowGraph { district } | Intent::Predict { district } => Some(district),
            Intent::PlainText { .. } => None,
        }
    }
}

/// Classify a raw model reply.
///
/// A command whose closing `]` is missing, or whose district is blank, is
/// not a usable command and falls back to plain text.
pub fn classify(reply: &str) -> Intent {
    if let Some(district) = extract_district(reply, SHOW_GRAPH_PREFIX) {
        return Intent::ShowGraph { district };
    }
    if let Some(district) = extract_district(reply, PREDICT_PREFIX) {
        return Intent::Predict { district };
    }
    Intent::PlainText {
        text: reply.to_string(),
    }
}

fn extract_district(reply: &str, prefix: &str) -> Option<String> {
    let rest = reply.strip_prefix(prefix)?;
    let close = rest.find(']')?;
    let inner = &rest[..close];
    // Commands are single-line tokens
    if inner.contains('\n') {
        return None;
    }
    let district = inner.trim();
    if district.is_empty() {
        return None;
    }
    Some(district.to_string())
}
