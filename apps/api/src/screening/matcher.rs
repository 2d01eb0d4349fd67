//! Match evaluator: asks the model whether a resume fits a job description.

use tracing::info;

use crate::llm_client::{InferenceClient, LlmError};
use crate::screening::prompts::match_prompt;

/// Sends one YES/NO prompt and interprets the reply. No retry.
pub async fn evaluate_match(
    llm: &dyn InferenceClient,
    jd_text: &str,
    resume_text: &str,
) -> Result<bool, LlmError> {
    let response = llm.complete(&match_prompt(jd_text, resume_text)).await?;
    let matched = is_affirmative(&response);
    info!(matched, "Match evaluation complete");
    Ok(matched)
}

/// True iff "YES" appears anywhere in the trimmed, uppercased reply.
pub fn is_affirmative(response: &str) -> bool {
    response.trim().to_uppercase().contains("YES")
}
