//! Business logic services for the Ingres groundwater assistant

pub mod conversation;
pub mod forecast;
pub mod session;

pub use conversation::{ChatOrchestrator, TurnState};
pub use forecast::{ForecastError, ForecastRequester};
pub use session::{ChatSession, SessionManager};
