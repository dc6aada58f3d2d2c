use sha2::{Digest, Sha256};

/// Deterministic key for a model response to a given log text
///
/// Hashes provider, model, system prompt and raw log text; the structured
/// analysis is not part of the key.
pub fn cache_key(
    provider: &str,
    model: &str,
    system_prompt: Option<&str>,
    raw_text: &str,
) -> String {
    let payload = [provider, model, system_prompt.unwrap_or(""), raw_text].join("\n");
    format!("{:x}", Sha256::digest(payload.as_bytes()))
}
