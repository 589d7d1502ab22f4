//! Shared types and protocol logic for the Ingres groundwater assistant
//!
//! This crate contains the dataset, transcript models and the reply
//! command protocol, shared between the backend and the browser (via WASM).

pub mod command;
pub mod dataset;
pub mod models;
pub mod replies;
pub mod types;
pub mod validation;

pub use command::*;
pub use dataset::*;
pub use models::*;
pub use replies::*;
pub use types::*;
pub use validation::*;
