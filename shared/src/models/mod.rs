//! Domain models for the Ingres groundwater assistant

mod conversation;
mod forecast;
mod groundwater;

pub use conversation::*;
pub use forecast::*;
pub use groundwater::*;
