//! Announcement rewriting: one call to the LLM collaborator per request,
//! no retry. The `Rewriter` trait is the substitution seam for tests.

use serde::{Deserialize, Serialize};

use crate::config::OpenAiConfig;
use crate::error::{ConfigurationError, RewriteError};
use crate::request::Language;

/// Policy sent with every rewrite request. The safety transformation is
/// best-effort: it is asserted only through this instruction.
const SYSTEM_RULES: &str = "\
You are an announcement copywriter.
- Return a SHORT, polished announcement: max 2 sentences.
- Respect the requested style: friendly | formal | urgent | custom.
- Write the announcement in the requested language (en, es, ca or fa).
- Be inclusive and appropriate; avoid targeting protected traits (age, gender, etc.).
- If the request is unsafe/inappropriate, transform it into a safe, inclusive announcement.
- Output ONLY the announcement text, no quotes, no preface.
";

/// Capability seam for the rewriting collaborator.
pub trait Rewriter {
    /// Rewrite raw user text into a draft announcement in `language`,
    /// honoring the style note. Surrounding whitespace is trimmed; any
    /// further shaping is the prosody pass's job.
    fn rewrite(
        &self,
        user_text: &str,
        style_note: &str,
        language: Language,
    ) -> Result<String, RewriteError>;
}

/// Composed user prompt for one rewrite.
fn compose_prompt(user_text: &str, style_note: &str, language: Language) -> String {
    format!("LANGUAGE: {language}\nSTYLE: {style_note}\nUser request:\n{user_text}")
}

/// OpenAI chat-completions backed rewriter.
pub struct OpenAiRewriter {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiRewriter {
    pub fn new(config: &OpenAiConfig) -> Result<Self, ConfigurationError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigurationError::MissingApiKey)?;
        Ok(Self {
            client: reqwest::blocking::Client::new(),
            base_url: config.base_url.clone(),
            api_key,
            model: config.model.clone(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl Rewriter for OpenAiRewriter {
    fn rewrite(
        &self,
        user_text: &str,
        style_note: &str,
        language: Language,
    ) -> Result<String, RewriteError> {
        let prompt = compose_prompt(user_text, style_note, language);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_RULES },
                ChatMessage { role: "user", content: &prompt },
            ],
            temperature: 0.2,
        };

        tracing::debug!(model = %self.model, %language, "requesting announcement rewrite");
        let resp = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(RewriteError::Api { status: status.as_u16(), body });
        }

        let parsed: ChatResponse = resp.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(RewriteError::EmptyCompletion)
    }
}
