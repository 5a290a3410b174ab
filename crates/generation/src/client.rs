//! HTTP client for a chat-completion style generation endpoint.
//!
//! Sends `{ model, systemPrompt, messages, max_tokens }` to
//! `{api_url}/chat/completions`, with the system prompt also leading
//! `messages` as a `system` message for endpoints that ignore
//! `systemPrompt`. Reads back
//! `{ choices: [{ message: { content } }], usage: { total_tokens } }`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::{ChatMessage, Completion, CompletionRequest, TextGenerator};

/// HTTP client for the generation service.
pub struct ChatCompletionClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Debug, Serialize)]
struct RequestBody<'a> {
    model: &'a str,
    #[serde(rename = "systemPrompt")]
    system_prompt: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

impl<'a> RequestBody<'a> {
    fn new(model: &'a str, request: &'a CompletionRequest) -> Self {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if !request.system_prompt.is_empty() {
            messages.push(ChatMessage::system(request.system_prompt.as_str()));
        }
        messages.extend(request.messages.iter().cloned());

        Self {
            model,
            system_prompt: &request.system_prompt,
            messages,
            max_tokens: request.max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: i32,
}

impl ChatCompletionClient {
    /// Create a client.
    ///
    /// * `api_url` - Base URL, e.g. `https://api.openai.com/v1`.
    /// * `api_key` - Bearer key; `None` makes every call fail with
    ///   [`GenerationError::MissingApiKey`].
    pub fn new(api_url: String, api_key: Option<String>, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_url)
    }

    // ---- private helpers ----

    /// Return the response unchanged on a 2xx status, or an
    /// [`GenerationError::Upstream`] carrying the status and body.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GenerationError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Pull the first choice's content and the token count out of a response.
fn into_completion(body: ResponseBody) -> Result<Completion, GenerationError> {
    let content = body
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| GenerationError::MalformedResponse("response has no content".into()))?;

    Ok(Completion {
        content,
        total_tokens: body.usage.map_or(0, |u| u.total_tokens),
    })
}

#[async_trait]
impl TextGenerator for ChatCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;

        let body = RequestBody::new(&self.model, request);

        tracing::debug!(
            model = %self.model,
            max_tokens = request.max_tokens,
            "Sending generation request",
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let parsed: ResponseBody = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        into_completion(parsed)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn missing_api_key_fails_without_network() {
        let client = ChatCompletionClient::new(
            "http://127.0.0.1:9".into(),
            None,
            "test-model".into(),
        );
        let request = CompletionRequest {
            system_prompt: "sys".into(),
            messages: vec![ChatMessage::user("hi")],
            max_tokens: 10,
        };
        assert_matches!(
            client.complete(&request).await,
            Err(GenerationError::MissingApiKey)
        );
    }

    #[test]
    fn request_body_uses_wire_names() {
        let request = CompletionRequest {
            system_prompt: "be brief".into(),
            messages: vec![ChatMessage::user("hello")],
            max_tokens: 50,
        };
        let json = serde_json::to_value(RequestBody::new("m", &request)).unwrap();
        assert_eq!(json["systemPrompt"], "be brief");
        assert_eq!(json["max_tokens"], 50);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "be brief");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hello");
    }

    #[test]
    fn empty_system_prompt_adds_no_system_message() {
        let request = CompletionRequest {
            system_prompt: String::new(),
            messages: vec![ChatMessage::user("hello")],
            max_tokens: 50,
        };
        let json = serde_json::to_value(RequestBody::new("m", &request)).unwrap();
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn completion_from_response() {
        let body: ResponseBody = serde_json::from_value(json!({
            "choices": [{"message": {"content": "hello"}}],
            "usage": {"total_tokens": 42}
        }))
        .unwrap();
        let completion = into_completion(body).unwrap();
        assert_eq!(completion.content, "hello");
        assert_eq!(completion.total_tokens, 42);
    }

    #[test]
    fn empty_choices_is_malformed() {
        let body: ResponseBody = serde_json::from_value(json!({"choices": []})).unwrap();
        assert_matches!(
            into_completion(body),
            Err(GenerationError::MalformedResponse(_))
        );
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ChatCompletionClient::new("https://api.example/v1/".into(), None, "m".into());
        assert_eq!(client.endpoint(), "https://api.example/v1/chat/completions");
    }
}
