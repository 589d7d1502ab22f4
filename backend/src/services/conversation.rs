//! Conversation orchestration
//!
//! Drives turn-taking: `Idle -> AwaitingReply -> (Idle | AwaitingForecast) -> Idle`.
//! Only one turn may be in flight; a submit while busy is rejected, not
//! queued. The transcript is append-only.

use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use serde::Serialize;
use shared::{
    classify, forecast_pending, forecast_ready, graph_caption, greeting, no_data_found,
    validate_user_input, ConversationEntry, Dataset, Intent, LanguageOption, FORECAST_FAILED,
};

use crate::error::{AppError, AppResult};
use crate::external::LlmClient;
use crate::services::forecast::ForecastRequester;
use crate::services::session::SessionManager;

/// Turn state machine
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    Idle,
    AwaitingReply,
    AwaitingForecast,
}

impl TurnState {
    pub fn is_busy(&self) -> bool {
        *self != TurnState::Idle
    }
}

/// Single conversation shared by the browser client
pub struct ChatOrchestrator {
    sessions: SessionManager,
    forecaster: ForecastRequester,
    dataset: Arc<Dataset>,
    state: Mutex<TurnState>,
    transcript: RwLock<Vec<ConversationEntry>>,
}

/// Returns the state machine to `Idle` when a turn ends, however it ends
struct TurnGuard<'a> {
    state: &'a Mutex<TurnState>,
}

impl TurnGuard<'_> {
    fn advance(&self, next: TurnState) {
        *lock(self.state) = next;
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        *lock(self.state) = TurnState::Idle;
    }
}

fn lock(state: &Mutex<TurnState>) -> MutexGuard<'_, TurnState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ChatOrchestrator {
    pub fn new(llm: Arc<dyn LlmClient>, dataset: Arc<Dataset>) -> Self {
        Self {
            sessions: SessionManager::new(Arc::clone(&llm), &dataset),
            forecaster: ForecastRequester::new(llm, Arc::clone(&dataset)),
            dataset,
            state: Mutex::new(TurnState::Idle),
            transcript: RwLock::new(vec![ConversationEntry::assistant(greeting())]),
        }
    }

    pub fn turn_state(&self) -> TurnState {
        *lock(&self.state)
    }

    /// Snapshot of the full transcript
    pub fn transcript(&self) -> Vec<ConversationEntry> {
        self.transcript
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Run one user turn and return the entries it appended, in order.
    ///
    /// Errors only for rejected input (blank, or a turn already in flight);
    /// model failures end up as assistant text in the transcript.
    pub async fn submit(
        &self,
        text: &str,
        language: &LanguageOption,
    ) -> AppResult<Vec<ConversationEntry>> {
        let text = validate_user_input(text).map_err(|msg| AppError::validation("text", msg))?;
        let turn = self.begin_turn()?;

        let prior = self.transcript();
        let mut appended = Vec::new();
        self.append(&mut appended, ConversationEntry::user(text));

        let mut session = self.sessions.reset_session(&prior);
        let reply = self.sessions.send_turn(&mut session, text, language).await;

        let intent = classify(&reply);
        tracing::debug!(?intent, "Classified model reply");

        match intent {
            Intent::ShowGraph { district } => {
                let entry = self.graph_entry(&district);
                self.append(&mut appended, entry);
            }
            Intent::Predict { district } => {
                match self.dataset.canonical_district(&district) {
                    Some(canonical) => {
                        let year = self.dataset.forecast_year();
                        self.append(
                            &mut appended,
                            ConversationEntry::assistant(forecast_pending(canonical, year)),
                        );
                        turn.advance(TurnState::AwaitingForecast);

                        let entry = self.forecast_entry(canonical, language).await;
                        self.append(&mut appended, entry);
                    }
                    None => {
                        tracing::info!(%district, "Forecast requested for unknown district");
                        self.append(
                            &mut appended,
                            ConversationEntry::assistant(no_data_found(&district)),
                        );
                    }
                }
            }
            Intent::PlainText { text } => {
                self.append(&mut appended, ConversationEntry::assistant(text));
            }
        }

        Ok(appended)
    }

    fn begin_turn(&self) -> AppResult<TurnGuard<'_>> {
        let mut state = lock(&self.state);
        if state.is_busy() {
            tracing::warn!(state = ?*state, "Dropping message submitted while a turn is in progress");
            return Err(AppError::TurnInProgress);
        }
        *state = TurnState::AwaitingReply;
        Ok(TurnGuard { state: &self.state })
    }

    fn append(&self, appended: &mut Vec<ConversationEntry>, entry: ConversationEntry) {
        self.transcript
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry.clone());
        appended.push(entry);
    }

    fn graph_entry(&self, district: &str) -> ConversationEntry {
        let records = self.dataset.for_district(district);
        match records.first() {
            Some(first) => {
                let caption = graph_caption(&first.district);
                ConversationEntry::graph(caption, records)
            }
            None => {
                tracing::info!(%district, "Graph requested for unknown district");
                ConversationEntry::assistant(no_data_found(district))
            }
        }
    }

    async fn forecast_entry(&self, district: &str, language: &LanguageOption) -> ConversationEntry {
        match self.forecaster.request_forecast(district, language).await {
            Ok(forecast) => {
                let text = forecast_ready(district, forecast.year, forecast.confidence);
                let records = self.dataset.for_district(district);
                ConversationEntry::prediction(text, records, forecast)
            }
            Err(e) => {
                tracing::error!(%district, "Failed to produce forecast: {}", e);
                ConversationEntry::assistant(FORECAST_FAILED)
            }
        }
    }
}
