//! AI analyst modules.
//!
//! `context` composes the bounded dataset digest; `client` carries it
//! to the external Ollama model.

pub mod client;
pub mod context;

pub use client::{AnalystClient, AnalystConfig};
