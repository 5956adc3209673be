//! services/api/src/adapters/coach_llm.rs
//!
//! This module contains the adapter for the coaching LLM.
//! It implements the `CoachService` port from the `core` crate against any
//! OpenAI-compatible chat completions endpoint (Gemini by default).

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use smartfit_core::{
    coach::CoachRequest,
    domain::Role,
    ports::{CoachService, PortError, PortResult},
};
use std::time::{Duration, Instant};
use tracing::{debug, info};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CoachService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiCoachAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCoachAdapter {
    /// Creates a new `OpenAiCoachAdapter`.
    ///
    /// The client's rate-limit backoff is replaced with one that gives up
    /// after the first attempt: a failed coach call is never retried.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        Self {
            client: client.with_backoff(no_retry),
            model,
        }
    }

    /// Flattens the coach request into system, history and current user messages.
    fn to_messages(request: &CoachRequest) -> PortResult<Vec<ChatCompletionRequestMessage>> {
        let mut messages = Vec::with_capacity(request.history.len() + 2);

        messages.push(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system_instruction.as_str())
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        );

        for turn in &request.history {
            let message: ChatCompletionRequestMessage = match turn.role {
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(turn.text.as_str())
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?
                    .into(),
                Role::Coach => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(turn.text.as_str())
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?
                    .into(),
            };
            messages.push(message);
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.message.as_str())
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        );

        Ok(messages)
    }
}

//=========================================================================================
// `CoachService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CoachService for OpenAiCoachAdapter {
    /// Sends the assembled conversation and returns the first choice's text,
    /// or an empty string when the model produced none.
    async fn generate(&self, request: &CoachRequest) -> PortResult<String> {
        let messages = Self::to_messages(request)?;
        debug!(count = messages.len(), model = %self.model, "Sending coach request.");

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(request.temperature)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let llm_start = Instant::now();
        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;
        info!("⏱️ Coach LLM took: {:?}", llm_start.elapsed());

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}
