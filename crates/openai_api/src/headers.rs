use std::collections::BTreeMap;

use crate::config::OpenAiApiConfig;
use crate::error::OpenAiApiError;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_USER_AGENT: &str = "user-agent";

/// Build a deterministic header map for chat-completions requests.
pub fn build_headers(
    config: &OpenAiApiConfig,
    user_agent: Option<&str>,
) -> Result<BTreeMap<String, String>, OpenAiApiError> {
    let mut headers = BTreeMap::new();

    if config.api_key.trim().is_empty() {
        return Err(OpenAiApiError::MissingApiKey);
    }

    headers.insert(
        HEADER_AUTHORIZATION.to_owned(),
        format!("Bearer {}", config.api_key.trim()),
    );
    headers.insert(HEADER_ACCEPT.to_owned(), "application/json".to_owned());
    headers.insert(
        HEADER_CONTENT_TYPE.to_owned(),
        "application/json".to_owned(),
    );

    let ua = match (user_agent, config.user_agent.as_deref()) {
        (Some(explicit), _) if !explicit.trim().is_empty() => explicit.trim().to_owned(),
        (None, Some(explicit)) if !explicit.trim().is_empty() => explicit.trim().to_owned(),
        _ => default_user_agent(),
    };
    headers.insert(HEADER_USER_AGENT.to_owned(), ua);

    for (key, value) in &config.extra_headers {
        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_owned());
    }

    Ok(headers)
}

fn default_user_agent() -> String {
    format!("dreadhall/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::{build_headers, HEADER_AUTHORIZATION, HEADER_USER_AGENT};
    use crate::config::OpenAiApiConfig;
    use crate::error::OpenAiApiError;

    #[test]
    fn blank_api_key_is_rejected() {
        let config = OpenAiApiConfig::new("   ");
        let error = build_headers(&config, None).expect_err("blank key should fail");
        assert!(matches!(error, OpenAiApiError::MissingApiKey));
    }

    #[test]
    fn bearer_authorization_uses_trimmed_key() {
        let config = OpenAiApiConfig::new("  sk-test  ");
        let headers = build_headers(&config, None).expect("headers should build");
        assert_eq!(
            headers.get(HEADER_AUTHORIZATION).map(String::as_str),
            Some("Bearer sk-test")
        );
    }

    #[test]
    fn explicit_user_agent_wins_over_config_and_default() {
        let config = OpenAiApiConfig::new("sk-test").with_user_agent("from-config");
        let headers =
            build_headers(&config, Some("from-caller")).expect("headers should build");
        assert_eq!(
            headers.get(HEADER_USER_AGENT).map(String::as_str),
            Some("from-caller")
        );
    }

    #[test]
    fn extra_headers_are_lowercased_and_merged() {
        let config = OpenAiApiConfig::new("sk-test").insert_header("X-Session", " abc ");
        let headers = build_headers(&config, None).expect("headers should build");
        assert_eq!(headers.get("x-session").map(String::as_str), Some("abc"));
    }
}
