//! OpenAI Chat Completions client implementing `ChatModel` (ChatOpenAI).
//!
//! Uses the real Chat Completions API. The API key comes from the client
//! config or the `OPENAI_API_KEY` environment variable; a missing key is not
//! checked up front, it surfaces as an error on the first call. Optional
//! tools enable `tool_calls` in the response.
//!
//! **Interaction**: Implements `ChatModel`; drop-in beside `ScriptedModel`.
//! Depends on `async_openai`.

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::AgentError;
use crate::llm::{ChatModel, ModelReply};
use crate::message::{Message, ToolCall};
use crate::tools::ToolSpec;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionMessageToolCalls, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage, ChatCompletionTool,
        ChatCompletionTools, CreateChatCompletionRequestArgs, FunctionObject,
    },
    Client,
};

/// OpenAI Chat Completions client implementing `ChatModel`.
///
/// Uses `OPENAI_API_KEY` from the environment by default, or provide config
/// via [`ChatOpenAI::with_config`]. Set tools (e.g. from
/// [`MathOp::specs`](crate::tools::MathOp::specs)) to enable tool calls; the
/// choice of calling them is left to the model so a turn can end with a
/// plain reply.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    tools: Option<Vec<ToolSpec>>,
    temperature: Option<f32>,
}

impl ChatOpenAI {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            tools: None,
            temperature: None,
        }
    }

    /// Build client with custom config (e.g. explicit API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            tools: None,
            temperature: None,
        }
    }

    /// Set tools for this client (enables tool_calls in responses).
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set temperature (0–2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Convert our `Message` list to Chat Completions request messages.
    ///
    /// Tool-result entries go on the wire as user-visible context lines
    /// (`Tool <call_id> returned: <content>`); requested tool calls are never
    /// sent back, only their results.
    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant { content, .. } => {
                    ChatCompletionRequestMessage::Assistant((content.as_str()).into())
                }
                Message::Tool { call_id, content } => {
                    let line = format!("Tool {} returned: {}", call_id, content);
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(
                        line.as_str(),
                    ))
                }
            })
            .collect()
    }
}

#[async_trait]
impl ChatModel for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<ModelReply, AgentError> {
        let wire_messages = Self::messages_to_request(messages);
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(wire_messages);

        if let Some(ref tools) = self.tools {
            let chat_tools: Vec<ChatCompletionTools> = tools
                .iter()
                .map(|t| {
                    ChatCompletionTools::Function(ChatCompletionTool {
                        function: FunctionObject {
                            name: t.name.clone(),
                            description: t.description.clone(),
                            parameters: Some(t.input_schema.clone()),
                            ..Default::default()
                        },
                    })
                })
                .collect();
            args.tools(chat_tools);
        }

        if let Some(t) = self.temperature {
            args.temperature(t);
        }

        let request = args
            .build()
            .map_err(|e| AgentError::Model(format!("OpenAI request build failed: {}", e)))?;

        let tools_count = self.tools.as_ref().map(|t| t.len()).unwrap_or(0);
        debug!(
            model = %self.model,
            message_count = messages.len(),
            tools_count = tools_count,
            temperature = ?self.temperature,
            "OpenAI chat create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(request = %js, "OpenAI request body");
        } else {
            trace!(request = ?request, "OpenAI request body (debug)");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::Model(format!("OpenAI API error: {}", e)))?;

        if let Ok(js) = serde_json::to_string_pretty(&response) {
            trace!(response = %js, "OpenAI response body");
        } else {
            trace!(response = ?response, "OpenAI response body (debug)");
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Model("OpenAI returned no choices".to_string()))?;

        let msg = choice.message;
        let content = msg.content.unwrap_or_default();
        let tool_calls: Vec<ToolCall> = msg
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tc| {
                if let ChatCompletionMessageToolCalls::Function(f) = tc {
                    Some(ToolCall {
                        id: f.id,
                        name: f.function.name,
                        arguments: f.function.arguments,
                    })
                } else {
                    None
                }
            })
            .collect();

        Ok(ModelReply {
            content,
            tool_calls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: ChatOpenAI::new sets model; tools and temperature stay unset.
    #[test]
    fn chat_openai_new_creates_client() {
        let _ = ChatOpenAI::new("gpt-3.5-turbo");
        let _ = ChatOpenAI::new("gpt-4o-mini");
    }

    /// **Scenario**: ChatOpenAI::with_config uses a custom config and model.
    #[test]
    fn chat_openai_with_config_creates_client() {
        let config = OpenAIConfig::new().with_api_key("test-key");
        let _ = ChatOpenAI::with_config(config, "gpt-3.5-turbo");
    }

    /// **Scenario**: builder chain with_tools and with_temperature builds without panic.
    #[test]
    fn chat_openai_with_tools_and_temperature_builder() {
        let tools = vec![ToolSpec {
            name: "add".into(),
            description: None,
            input_schema: serde_json::json!({}),
        }];
        let _ = ChatOpenAI::new("gpt-3.5-turbo")
            .with_tools(tools)
            .with_temperature(0.5f32);
    }

    /// **Scenario**: each transcript entry maps to one wire message; tool results
    /// go out as user-role context lines naming the call id.
    #[test]
    fn messages_to_request_maps_every_role() {
        let messages = [
            Message::system("be brief"),
            Message::user("Add 34+54"),
            Message::assistant_with_calls("", vec![ToolCall::new("c1", "add", "{}")]),
            Message::tool("c1", "88"),
        ];

        let wire = ChatOpenAI::messages_to_request(&messages);
        assert_eq!(wire.len(), 4);
        assert!(matches!(wire[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(wire[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(wire[2], ChatCompletionRequestMessage::Assistant(_)));
        assert!(matches!(wire[3], ChatCompletionRequestMessage::User(_)));

        let json = serde_json::to_value(&wire[3]).expect("serialize wire message");
        assert_eq!(json["role"], "user");
        assert!(
            json["content"]
                .as_str()
                .is_some_and(|c| c.contains("Tool c1 returned: 88")),
            "tool result line: {}",
            json
        );
    }

    /// **Scenario**: invoke() against an unreachable API base returns an error
    /// (no real API key needed).
    #[tokio::test]
    async fn invoke_with_unreachable_base_returns_error() {
        let config = OpenAIConfig::new()
            .with_api_key("test-key")
            .with_api_base("https://127.0.0.1:1");
        let client = ChatOpenAI::with_config(config, "gpt-3.5-turbo");
        let messages = [Message::user("Hello")];

        let result = client.invoke(&messages).await;

        assert!(
            result.is_err(),
            "invoke against unreachable base should return Err"
        );
    }

    /// **Scenario**: invoke() against the real API returns Ok when OPENAI_API_KEY is set.
    #[tokio::test]
    #[ignore = "Requires OPENAI_API_KEY; run with: cargo test -p banter invoke_with_real_api -- --ignored"]
    async fn invoke_with_real_api_returns_ok() {
        std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set for this test");

        let model = std::env::var("MODEL")
            .or_else(|_| std::env::var("OPENAI_MODEL"))
            .unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let client = ChatOpenAI::new(model);
        let messages = [Message::user("Say exactly: ok")];

        let result = client.invoke(&messages).await;

        let reply = result.expect("invoke with real API should succeed");
        assert!(
            !reply.content.is_empty() || !reply.tool_calls.is_empty(),
            "reply should have content or tool_calls"
        );
    }
}
