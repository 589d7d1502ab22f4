//! Conversation transcript models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ForecastRecord, HistoricalRecord};
use crate::replies::strip_emphasis;

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// Intent tag of a transcript entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Text,
    Graph,
    Prediction,
}

/// Payload carried by an entry, keyed by its intent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryPayload {
    Text,
    Graph {
        records: Vec<HistoricalRecord>,
    },
    Prediction {
        records: Vec<HistoricalRecord>,
        forecast: ForecastRecord,
    },
}

/// One item of the visible transcript. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationEntry {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: EntryPayload,
}

impl ConversationEntry {
    fn new(sender: Sender, text: impl Into<String>, payload: EntryPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            created_at: Utc::now(),
            payload,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text, EntryPayload::Text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text, EntryPayload::Text)
    }

    pub fn graph(text: impl Into<String>, records: Vec<HistoricalRecord>) -> Self {
        Self::new(Sender::Assistant, text, EntryPayload::Graph { records })
    }

    pub fn prediction(
        text: impl Into<String>,
        records: Vec<HistoricalRecord>,
        forecast: ForecastRecord,
    ) -> Self {
        Self::new(
            Sender::Assistant,
            text,
            EntryPayload::Prediction { records, forecast },
        )
    }

    pub fn kind(&self) -> EntryKind {
        match self.payload {
            EntryPayload::Text => EntryKind::Text,
            EntryPayload::Graph { .. } => EntryKind::Graph,
            EntryPayload::Prediction { .. } => EntryKind::Prediction,
        }
    }

    /// Plain-text entries are the only ones replayed as model history
    pub fn is_plain_text(&self) -> bool {
        self.kind() == EntryKind::Text
    }

    /// Historical rows attached to a graph or prediction entry
    pub fn records(&self) -> Option<&[HistoricalRecord]> {
        match &self.payload {
            EntryPayload::Text => None,
            EntryPayload::Graph { records } | EntryPayload::Prediction { records, .. } => {
                Some(records)
            }
        }
    }

    pub fn forecast(&self) -> Option<&ForecastRecord> {
        match &self.payload {
            EntryPayload::Prediction { forecast, .. } => Some(forecast),
            _ => None,
        }
    }

    /// Text handed to the speech synthesizer
    pub fn spoken_text(&self) -> String {
        let text = strip_emphasis(&self.text);
        match self.forecast() {
            Some(forecast) => format!("{} My rationale is: {}", text, forecast.rationale),
            None => text,
        }
    }
}
