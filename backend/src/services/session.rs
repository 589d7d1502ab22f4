//! LLM session manager
//!
//! Owns the conversational context sent to the model. The session is
//! rebuilt from the visible transcript before every turn, so the replayed
//! history always matches what the user sees, even after a language switch
//! or a failed turn.

use std::sync::Arc;

use shared::{ConversationEntry, Dataset, LanguageOption, Sender, BOT_NAME, CONNECTION_APOLOGY};

use crate::external::{ChatContent, GenerateRequest, LlmClient};

/// Builds sessions and sends conversational turns
#[derive(Clone)]
pub struct SessionManager {
    llm: Arc<dyn LlmClient>,
    system_instruction: Arc<str>,
}

/// A conversational context: the system instruction plus replayed history.
///
/// Returned by [`SessionManager::reset_session`] and passed explicitly into
/// each turn.
#[derive(Debug, Clone)]
pub struct ChatSession {
    system_instruction: Arc<str>,
    history: Vec<ChatContent>,
}

impl ChatSession {
    pub fn history(&self) -> &[ChatContent] {
        &self.history
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }
}

impl SessionManager {
    pub fn new(llm: Arc<dyn LlmClient>, dataset: &Dataset) -> Self {
        Self {
            llm,
            system_instruction: build_system_instruction(dataset).into(),
        }
    }

    /// Start a fresh session replaying only plain-text transcript entries
    pub fn reset_session(&self, prior_turns: &[ConversationEntry]) -> ChatSession {
        let history = prior_turns
            .iter()
            .filter(|entry| entry.is_plain_text())
            .map(|entry| match entry.sender {
                Sender::User => ChatContent::user(entry.text.clone()),
                Sender::Assistant => ChatContent::model(entry.text.clone()),
            })
            .collect();

        ChatSession {
            system_instruction: Arc::clone(&self.system_instruction),
            history,
        }
    }

    /// Send one user utterance and return the raw reply text.
    ///
    /// Never fails: transport and service errors become a fixed apology.
    /// On success the exchange is appended to the session history.
    pub async fn send_turn(
        &self,
        session: &mut ChatSession,
        user_text: &str,
        language: &LanguageOption,
    ) -> String {
        let message = format!("(Respond in {}) {}", language.name, user_text);

        let mut contents = session.history.clone();
        contents.push(ChatContent::user(message.clone()));

        let request = GenerateRequest {
            system_instruction: Some(session.system_instruction.to_string()),
            contents,
            response_mime_type: None,
        };

        match self.llm.generate(request).await {
            Ok(reply) => {
                session.history.push(ChatContent::user(message));
                session.history.push(ChatContent::model(reply.clone()));
                reply
            }
            Err(e) => {
                tracing::error!("Error fetching conversational reply: {}", e);
                CONNECTION_APOLOGY.to_string()
            }
        }
    }
}

/// Persona, command grammar and the full dataset as pretty JSON
pub fn build_system_instruction(dataset: &Dataset) -> String {
    let data = dataset.to_pretty_json().unwrap_or_else(|e| {
        tracing::error!("Failed to serialize dataset for system instruction: {}", e);
        "[]".to_string()
    });
    let first = dataset.earliest_year();
    let last = dataset.latest_year();
    let next = dataset.forecast_year();

    format!(
        r#"You are '{bot}', an advanced AI assistant specializing in groundwater analysis and conservation. Your purpose is to help users understand groundwater data, predict future trends, and provide actionable suggestions for sustainability.

You have access to historical groundwater data for several districts in Tamil Nadu from {first} to {last}. This data is provided below.

Your capabilities:
1.  **Analyze Data:** Answer questions about the provided historical data.
2.  **Visualize Data:** If asked to show a graph, chart, or visualize data for a district, you MUST respond with ONLY the special command: `[SHOW_GRAPH:DISTRICT_NAME]`. Replace DISTRICT_NAME with the relevant district (e.g., Chennai, Madurai).
3.  **Predict Trends:** If asked for a forecast or prediction for the next year ({next}), you MUST respond with ONLY the special command: `[PREDICT:DISTRICT_NAME]`.
4.  **Provide Suggestions:** When asked for advice, conservation tips, or suggestions, analyze the district's status. Your suggestions MUST be short and conversational, like you are chatting with a friend. For instance: "The water level in Chennai is critical. We could all help by trying rainwater harvesting or fixing leaky taps at home. Every little bit helps!"
5.  **Borewell Suggestions:** If a user asks about building a borewell or drilling depth in a specific district, you MUST look at the latest available record for that district, specifically the 'Status' and 'WaterLevel_m' fields, and give a conversational drilling-depth recommendation:
    *   'Safe': water should be found at around [WaterLevel_m] meters; drilling a bit deeper helps ensure a consistent supply.
    *   'Semi-Critical': drilling is possible but needs care; plan for at least [WaterLevel_m] meters and consider rainwater harvesting.
    *   'Critical': if a borewell is absolutely essential, drill deeper than [WaterLevel_m] meters, warn that supply may be unreliable, and strongly suggest conservation and rainwater harvesting.
    *   For general borewell questions not tied to a district, give general conservation tips such as rainwater harvesting or checking for leaks.
6.  **Be Multilingual:** You MUST respond in the language requested at the start of the user's message.
7.  **General Conversation:** For greetings or general questions, respond politely and guide the user towards your capabilities.


Here is the historical data you must use:
{data}
"#,
        bot = BOT_NAME,
        first = first,
        last = last,
        next = next,
        data = data,
    )
}
