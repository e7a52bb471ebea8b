//! External (LLM-backed) generation path.
//!
//! The backend is an opaque collaborator behind [`CompletionPort`]: given
//! a system and user prompt it returns raw text. This module builds the
//! prompt from the flat field extraction, invokes the backend once, and
//! validates that the reply is a JSON array of records before accepting
//! it. No retries happen here; retry policy belongs to the caller.

use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::env;
use std::sync::Arc;

use crate::config::LlmSettings;
use crate::domain::error::{BackendError, GenerationError, GenerationResult};
use crate::domain::form::InputField;
use crate::generator::walker;

/// Port to the external text-completion backend.
#[async_trait]
pub trait CompletionPort: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, BackendError>;
}

/// OpenAI chat-completions implementation of [`CompletionPort`].
pub struct OpenAiBackend {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiBackend {
    pub fn new(settings: &LlmSettings) -> Result<Self, BackendError> {
        let env_var = settings.api_key_env.as_deref().unwrap_or("OPENAI_API_KEY");
        let api_key = env::var(env_var).map_err(|_| {
            BackendError::Authentication(format!("environment variable {} not set", env_var))
        })?;

        Ok(Self {
            client: Client::with_config(OpenAIConfig::new().with_api_key(api_key)),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionPort for OpenAiBackend {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, BackendError> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt.to_string())
                    .build()
                    .map_err(map_openai_err)?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_prompt.to_string())
                    .build()
                    .map_err(map_openai_err)?,
            ),
        ];

        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.model).messages(messages);
        if let Some(temp) = self.temperature {
            request_builder.temperature(temp);
        }
        if let Some(max_tokens) = self.max_tokens {
            request_builder.max_tokens(max_tokens as u16);
        }
        let request = request_builder.build().map_err(map_openai_err)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(map_openai_err)?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| BackendError::Parse("empty completion response".to_string()))
    }
}

pub(crate) fn map_openai_err(err: OpenAIError) -> BackendError {
    match err {
        OpenAIError::ApiError(api) => BackendError::Api {
            status: 500,
            message: api.message,
        },
        OpenAIError::Reqwest(e) => e.into(),
        OpenAIError::JSONDeserialize(e) => BackendError::Parse(e.to_string()),
        other => BackendError::Network(other.to_string()),
    }
}

/// Orchestrates the external generation path: flat extraction, prompt
/// construction, one backend call, reply validation.
pub struct LlmGenerator {
    backend: Arc<dyn CompletionPort>,
    default_sets: usize,
}

impl LlmGenerator {
    pub fn new(backend: Arc<dyn CompletionPort>, default_sets: usize) -> Self {
        Self {
            backend,
            default_sets,
        }
    }

    /// Generate `number_of_sets` flat records (no panel grouping) for the
    /// given schema. Zero falls back to the configured default count.
    pub async fn generate(
        &self,
        schema: &Value,
        number_of_sets: usize,
    ) -> GenerationResult<Vec<Map<String, Value>>> {
        if walker::root_components(schema).is_none() {
            return Err(GenerationError::InvalidSchema);
        }
        let fields = walker::prompt_fields(schema);
        if fields.is_empty() {
            return Err(GenerationError::NoFieldsFound);
        }
        let count = if number_of_sets == 0 {
            self.default_sets
        } else {
            number_of_sets
        };

        let (system_prompt, user_prompt) = build_prompts(&fields, count)?;
        tracing::info!(fields = fields.len(), sets = count, "requesting generation from backend");

        let raw = self.backend.complete(&system_prompt, &user_prompt).await?;
        parse_generation_reply(&raw)
    }
}

/// Build the system and user prompts for the backend.
pub fn build_prompts(fields: &[InputField], count: usize) -> GenerationResult<(String, String)> {
    let system_prompt = "You are an expert test data generator. Generate realistic test data \
for a web form based on the provided schema structure. Adhere strictly to all instructions. \
Output ONLY the raw JSON array."
        .to_string();

    let field_listing = serde_json::to_string_pretty(fields)?;
    let user_prompt = format!(
        "Generate {count} distinct sets of test data for the following form input fields:\n\n\
Input Fields (including type, label, key, validation, and options if any):\n{field_listing}\n\n\
Instructions:\n\
1. For each of the {count} sets, provide plausible values for *all* input fields listed.\n\
2. Adhere strictly to the input types (e.g., text, email, number, select, checkbox, radio, date).\n\
3. Consider field labels and keys to generate contextually appropriate data.\n\
4. If validation rules (e.g., required, minLength, maxLength, pattern) are present, ensure the generated data complies.\n\
5. For selection fields (select, radio, selectboxes), choose valid options from the 'values' property if provided, otherwise generate plausible ones.\n\
6. Format the output as a JSON array, where each element is an object representing one test set. Each object should have keys corresponding to the input field keys and the generated values.\n\
7. Ensure the JSON is valid.\n\
8. Do NOT include explanations or introductory text, only the JSON array.\n\
9. Provide only the raw JSON array as the response, without any surrounding text or markdown formatting."
    );

    Ok((system_prompt, user_prompt))
}

/// Validate and decode the backend reply: it must be a JSON array whose
/// elements are all objects. Markdown code fences around the payload are
/// tolerated and stripped.
pub fn parse_generation_reply(raw: &str) -> GenerationResult<Vec<Map<String, Value>>> {
    let body = strip_code_fence(raw.trim());

    let value: Value = serde_json::from_str(body).map_err(|e| {
        GenerationError::MalformedGenerationResult(format!("reply is not valid JSON: {}", e))
    })?;

    let Value::Array(items) = value else {
        return Err(GenerationError::MalformedGenerationResult(
            "expected a JSON array of records".to_string(),
        ));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            other => Err(GenerationError::MalformedGenerationResult(format!(
                "expected every record to be an object, got {}",
                type_name(&other)
            ))),
        })
        .collect()
}

fn strip_code_fence(body: &str) -> &str {
    let Some(rest) = body.strip_prefix("```") else {
        return body;
    };
    // Drop the optional language tag on the opening fence line.
    let rest = match rest.split_once('\n') {
        Some((_, rest)) => rest,
        None => rest,
    };
    rest.strip_suffix("```").map(str::trim).unwrap_or(body)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
