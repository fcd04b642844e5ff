//! Gemini text generation for Muse.
//!
//! Implements `muse_core::generate::TextGenerator` against the Gemini
//! `generateContent` endpoint with fixed sampling and safety policy.

pub mod client;
pub mod config;

pub use client::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use config::{GenerationConfig, HarmBlockThreshold, HarmCategory, SafetySetting};
