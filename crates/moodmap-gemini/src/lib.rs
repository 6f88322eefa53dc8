//! Minimal client for the Gemini `generateContent` endpoint.

pub mod client;
pub mod error;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
