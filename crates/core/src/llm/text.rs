/// Removes a surrounding Markdown code fence (```json ... ``` or ``` ... ```), if any.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let mut inner = trimmed;
    if let Some((_, after_first)) = inner.split_once('\n') {
        inner = after_first;
    } else {
        // Single-line fence: drop the opening marker only.
        inner = inner.trim_start_matches('`');
    }
    if let Some(end) = inner.rfind("```") {
        inner = &inner[..end];
    }
    inner.trim()
}

/// Normalizes model output; blank output counts as no narrative.
pub fn clean_narrative(text: &str) -> Option<String> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
