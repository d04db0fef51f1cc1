// Shared prompt fragments.
// Per-content-type prompts live in `crate::prompts`; this file holds the
// instructions every system prompt ends with.

/// Appended to every system prompt that offers a tool.
pub const STRUCTURED_OUTPUT_INSTRUCTION: &str = "\
    Return your answer ONLY by calling the provided function. \
    Fill every required field. \
    Do NOT reply with prose, markdown or code fences.";

/// Appended to every system prompt: candidate-facing content must stay factual.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    Use only the facts supplied in the request. \
    Do NOT invent employers, dates, metrics, credentials or company facts. \
    If a detail is unknown, say so or leave it general.";

/// Builds the final system prompt for a template.
pub fn compose_system(base: &str, structured: bool) -> String {
    if structured {
        format!("{base}\n\n{NO_FABRICATION_INSTRUCTION}\n\n{STRUCTURED_OUTPUT_INSTRUCTION}")
    } else {
        format!("{base}\n\n{NO_FABRICATION_INSTRUCTION}")
    }
}
