//! Locating the JSON payload inside free-form model output

use super::ParseError;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Returns the part of `raw_text` expected to hold the JSON object
///
/// Checked in order on the trimmed text, first match wins:
/// 1. a ```` ```json ```` fence: the text up to the next fence,
/// 2. a bare ```` ``` ```` fence: the text up to the next fence,
/// 3. the whole text.
///
/// Fenced payloads are trimmed. A fence that is never closed is not treated
/// specially: the payload then stops one character short of the end of the
/// text, which normally leaves it partial.
pub fn extract_json(raw_text: &str) -> &str {
    let trimmed = raw_text.trim();

    if let Some(start_idx) = trimmed.find(JSON_FENCE) {
        return fenced_payload(trimmed, start_idx + JSON_FENCE.len());
    }

    if let Some(start_idx) = trimmed.find(FENCE) {
        return fenced_payload(trimmed, start_idx + FENCE.len());
    }

    trimmed
}

fn fenced_payload(text: &str, content_start: usize) -> &str {
    let after_fence = &text[content_start..];
    match after_fence.find(FENCE) {
        Some(end_idx) => after_fence[..end_idx].trim(),
        None => {
            let cut = text
                .char_indices()
                .last()
                .map(|(idx, _)| idx)
                .unwrap_or(0);
            if cut > content_start {
                text[content_start..cut].trim()
            } else {
                ""
            }
        }
    }
}

/// Narrows `payload` to the span from its first `{` to its last `}`
///
/// Second chance for payloads wrapped in prose. Fails immediately when there
/// is no opening brace or no closing brace after it.
pub fn recover_object(payload: &str) -> Result<&str, ParseError> {
    let start = payload.find('{').ok_or_else(|| {
        ParseError::MalformedResponse("no JSON object found in response".to_string())
    })?;
    let end = payload.rfind('}').ok_or_else(|| {
        ParseError::MalformedResponse("unterminated JSON object in response".to_string())
    })?;

    if end < start {
        return Err(ParseError::MalformedResponse(
            "no JSON object found in response".to_string(),
        ));
    }

    Ok(&payload[start..=end])
}
