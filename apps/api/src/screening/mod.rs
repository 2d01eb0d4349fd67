// Screening: resume match check, fill-in-the-blank question generation, answer scoring.
// All model calls go through llm_client::InferenceClient.

pub mod flow;
pub mod handlers;
pub mod matcher;
pub mod prompts;
pub mod questions;
pub mod scoring;
