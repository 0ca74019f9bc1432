use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::config::OpenAiApiConfig;
use crate::error::{parse_error_message, OpenAiApiError};
use crate::headers::build_headers;
use crate::payload::{ChatRequest, ChatResponse};
use crate::url::normalize_chat_url;

#[derive(Debug)]
pub struct OpenAiApiClient {
    http: Client,
    config: OpenAiApiConfig,
}

impl OpenAiApiClient {
    pub fn new(config: OpenAiApiConfig) -> Result<Self, OpenAiApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(OpenAiApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &OpenAiApiConfig {
        &self.config
    }

    pub fn normalized_endpoint(&self) -> String {
        normalize_chat_url(&self.config.base_url)
    }

    pub fn build_headers(&self, user_agent: Option<&str>) -> Result<HeaderMap, OpenAiApiError> {
        let headers = build_headers(&self.config, user_agent)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                    OpenAiApiError::InvalidBaseUrl(format!("invalid header key: {key}"))
                })?,
                HeaderValue::from_str(&value).map_err(|_| {
                    OpenAiApiError::InvalidBaseUrl(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request(
        &self,
        request: &ChatRequest,
    ) -> Result<reqwest::RequestBuilder, OpenAiApiError> {
        validate_request_payload_shape(request)?;

        let headers = self.build_headers(self.config.user_agent.as_deref())?;
        Ok(self
            .http
            .post(self.normalized_endpoint())
            .headers(headers)
            .json(request))
    }

    /// Sends one chat-completions request and returns the first choice's
    /// content.
    ///
    /// Exactly one HTTP call per invocation: a failed request is not retried
    /// here, it surfaces to the caller.
    pub async fn complete(&self, request: &ChatRequest) -> Result<String, OpenAiApiError> {
        let response = self
            .build_request(request)?
            .send()
            .await
            .map_err(OpenAiApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            return Err(OpenAiApiError::Status(
                status,
                parse_error_message(status, &body),
            ));
        }

        let parsed = response
            .json::<ChatResponse>()
            .await
            .map_err(OpenAiApiError::from)?;

        match parsed.first_content() {
            Some(content) if !content.trim().is_empty() => Ok(content.to_string()),
            _ => Err(OpenAiApiError::EmptyCompletion),
        }
    }
}

fn validate_request_payload_shape(request: &ChatRequest) -> Result<(), OpenAiApiError> {
    if request.messages.is_empty() {
        return Err(OpenAiApiError::Unknown(
            "'messages' must carry at least one entry".to_string(),
        ));
    }
    if request.model.trim().is_empty() {
        return Err(OpenAiApiError::Unknown(
            "'model' must not be blank".to_string(),
        ));
    }

    Ok(())
}
