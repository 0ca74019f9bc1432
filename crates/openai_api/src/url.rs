/// Default base URL for chat-completions transport requests.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Normalize a base URL to a chat-completions endpoint.
///
/// Normalization rules:
/// 1) keep `/chat/completions` unchanged
/// 2) append `/completions` when path ends in `/chat`
/// 3) append `/chat/completions` otherwise
pub fn normalize_chat_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_OPENAI_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        return trimmed.to_string();
    }
    if trimmed.ends_with("/chat") {
        return format!("{trimmed}/completions");
    }
    format!("{trimmed}/chat/completions")
}
