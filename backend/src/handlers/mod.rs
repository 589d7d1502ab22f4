//! HTTP handlers

mod chat;
mod dataset;
mod health;

pub use chat::*;
pub use dataset::*;
pub use health::*;
