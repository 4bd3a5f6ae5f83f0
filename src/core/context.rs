//! Prompt-window assembly.
//!
//! Pure transformation from persisted history plus the new user input to
//! the exact message sequence submitted to the completion endpoint:
//! system directive, then the most recent prior messages, then the new
//! input. Nothing here touches storage or the network.

use crate::core::completion::PromptMessage;
use crate::core::types::ChatMessage;

/// Number of prior messages carried into each request (the last five
/// user/assistant exchanges). Older messages are dropped outright, with no
/// summarization, so request size stays constant as conversations grow.
pub const HISTORY_WINDOW: usize = 10;

const SYSTEM_DIRECTIVE: &str = "\
You are a helpful medical assistant chatbot. Your role is to:
1. Help predict possible conditions based on symptoms described by users
2. Suggest which type of doctor to consult (e.g., General Physician, Cardiologist, Dermatologist, etc.)
3. Provide general precautions and health advice

IMPORTANT GUIDELINES:
- Always clarify that you're providing general information, not a diagnosis
- Recommend consulting a qualified healthcare professional for proper diagnosis
- Be empathetic and supportive
- If symptoms seem serious or emergency-related, strongly advise immediate medical attention
- Provide precautions that are safe and generally applicable
- When suggesting doctors, be specific about the specialty

Format your responses clearly with:
- Possible conditions (if applicable)
- Recommended doctor type
- General precautions
- When to seek immediate care

Always maintain a professional, caring tone.";

/// Build the message sequence for one completion request.
///
/// `prior` is the history as persisted, before the new input is appended
/// to it; the input rides along as the final message so it is never
/// double-counted inside the window.
pub fn assemble(prior: &[ChatMessage], input: &str, language: &str) -> Vec<PromptMessage> {
    let mut messages = Vec::with_capacity(HISTORY_WINDOW + 2);
    messages.push(PromptMessage::system(system_directive(language)));

    let start = prior.len().saturating_sub(HISTORY_WINDOW);
    for message in &prior[start..] {
        messages.push(PromptMessage::from_history(message));
    }

    messages.push(PromptMessage::user(input));
    messages
}

/// The fixed directive with the requested output language appended as the
/// final instruction.
fn system_directive(language: &str) -> String {
    format!(
        "{}\n\nIMPORTANT: Please respond in {} language.",
        SYSTEM_DIRECTIVE, language
    )
}
