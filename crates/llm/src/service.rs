//! The LLM service facade used by HTTP handlers.

use draftdeck_core::types::{DbId, DocType};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::openai::OpenAiClient;
use crate::outline::parse_outline_response;

/// Which backend produces text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Deterministic canned output; the default.
    Mock,
    /// OpenAI-compatible chat completions.
    OpenAi,
}

impl Provider {
    /// Name recorded in generation metadata and llm_logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Mock => "mock",
            Provider::OpenAi => "openai",
        }
    }
}

/// Inputs to a generation call.
#[derive(Debug, Clone, Default)]
pub struct GenerateParams {
    pub project_id: DbId,
    pub section_id: Option<DbId>,
    pub slide_index: Option<i32>,
    /// Existing section content (or the project topic) used as context.
    pub context: Option<String>,
    /// Optional template/style hint passed through to the prompt.
    pub template: Option<String>,
}

/// Result of a generation call.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Generated HTML fragment.
    pub text: String,
    /// Deterministic short identifier for this generation site.
    pub generation_id: String,
    /// Provider metadata surfaced to the client.
    pub meta: Value,
}

/// Facade over the selected provider.
pub struct LlmService {
    provider: Provider,
    client: Option<OpenAiClient>,
}

/// Paragraph cap for coerced docx content.
const MAX_DOC_PARAGRAPHS: usize = 8;

impl LlmService {
    /// Select a provider from configuration: the real client when an API
    /// key is present and mock mode is off, the mock otherwise.
    pub fn new(config: LlmConfig) -> Self {
        let service = match config.api_key {
            Some(key) if !config.use_mock => Self {
                provider: Provider::OpenAi,
                client: Some(OpenAiClient::new(key, config.model)),
            },
            _ => Self {
                provider: Provider::Mock,
                client: None,
            },
        };
        tracing::info!(provider = service.provider.as_str(), "LLM provider selected");
        service
    }

    /// The active provider.
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Generate content for a section or slide.
    ///
    /// Returns a docType-appropriate HTML fragment. Provider failures
    /// surface as [`LlmError::Upstream`]; there is no mock fallback.
    pub async fn generate(
        &self,
        params: &GenerateParams,
        doc_type: DocType,
    ) -> Result<Generation, LlmError> {
        let generation_id = generation_id(params);

        let Some(client) = &self.client else {
            return Ok(Generation {
                text: mock_generate(params.context.as_deref(), doc_type),
                generation_id,
                meta: json!({ "provider": Provider::Mock.as_str(), "mock": true }),
            });
        };

        let system = "You are a helpful assistant that generates structured content for \
                      documents and presentations. Return structured output only: a JSON \
                      object or a single HTML fragment, with no commentary.";
        let user = generate_prompt(params, doc_type);

        let content = client.chat(system, &user, 512).await?;
        let (text, structured) = coerce_to_html(&content, doc_type, params.context.as_deref());

        Ok(Generation {
            text,
            generation_id,
            meta: json!({
                "provider": Provider::OpenAi.as_str(),
                "model": client.model(),
                "structured": structured,
            }),
        })
    }

    /// Refine existing text according to a prompt, returning the revised
    /// text.
    pub async fn refine(&self, existing: &str, prompt: &str) -> Result<String, LlmError> {
        let Some(client) = &self.client else {
            return Ok(mock_refine(existing, prompt));
        };

        let system = "You are a helpful assistant that refines section text according to a prompt.";
        let user = format!("Original text:\n{existing}\n\nRefine with prompt: {prompt}");
        client.chat(system, &user, 512).await
    }

    /// Suggest an outline (section or slide titles) for a topic.
    pub async fn suggest_outline(
        &self,
        topic: &str,
        doc_type: DocType,
        template: Option<&str>,
    ) -> Result<Vec<String>, LlmError> {
        let Some(client) = &self.client else {
            return Ok(mock_outline(topic, doc_type));
        };

        let unit = match doc_type {
            DocType::Pptx => "slide titles",
            DocType::Docx => "section headers",
        };
        let system = "You are an assistant that suggests an outline (a list of section \
                      headers or slide titles) given a main topic.";
        let template_hint = template
            .map(|t| format!(" Use the following template/style as a guide: {t}."))
            .unwrap_or_default();
        let user = format!(
            "Provide a JSON array of 5 concise {unit} for the topic: {topic}. \
             Return only a JSON array of strings.{template_hint}"
        );

        let content = client.chat(system, &user, 300).await?;
        let titles = parse_outline_response(&content);
        if titles.is_empty() {
            return Err(LlmError::Upstream(
                "outline response contained no titles".to_string(),
            ));
        }
        Ok(titles)
    }
}

/// Deterministic 12-hex-char identifier for a generation site.
fn generation_id(params: &GenerateParams) -> String {
    let section = params
        .section_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "none".to_string());
    let slide = params
        .slide_index
        .map(|i| i.to_string())
        .unwrap_or_else(|| "none".to_string());
    let base = format!("project:{}|section:{section}|slide:{slide}", params.project_id);

    let digest = Sha256::digest(base.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex[..12].to_string()
}

/// Build the docType-aware user prompt for generation.
fn generate_prompt(params: &GenerateParams, doc_type: DocType) -> String {
    let instructions = match doc_type {
        DocType::Pptx => format!(
            "Generate structured slide content for slide {} of the project section. \
             Prefer a JSON object with keys `title` (string), `bullets` (array of short \
             strings), and optional `notes` (string). If you return HTML instead, wrap \
             it in a JSON object with an `html` field. Return ONLY the JSON object.",
            params.slide_index.unwrap_or(1)
        ),
        DocType::Docx => format!(
            "Generate a report-style HTML fragment for a section titled '{}'. Include a \
             heading (h2/h3) and 2-6 well-formed paragraphs of full sentences. Return \
             ONLY the HTML, or a JSON object with an `html` field.",
            params.context.as_deref().unwrap_or("")
        ),
    };

    let template_hint = params
        .template
        .as_deref()
        .map(|t| format!(" Use the following template/style as a guide: {t}."))
        .unwrap_or_default();

    let context = params
        .context
        .as_deref()
        .map(|c| format!(" Context: {c}"))
        .unwrap_or_default();

    format!("{instructions}{template_hint}{context}")
}

/// Coerce a provider response (JSON object or loose text) into an HTML
/// fragment. Returns the fragment and whether the response was structured.
fn coerce_to_html(content: &str, doc_type: DocType, context: Option<&str>) -> (String, bool) {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(content) {
        if let Some(html) = map.get("html").and_then(Value::as_str) {
            return (html.trim().to_string(), true);
        }
        return (struct_to_html(&map, doc_type), true);
    }

    let cleaned = strip_markdown_fences(content);
    if cleaned.contains('<') && cleaned.contains('>') {
        return (cleaned.trim().to_string(), false);
    }

    (wrap_plain_text(&cleaned, doc_type, context), false)
}

/// Build HTML from the common structured keys (`title`, `bullets`,
/// `paragraphs`, `notes`).
fn struct_to_html(map: &serde_json::Map<String, Value>, doc_type: DocType) -> String {
    let title = map
        .get("title")
        .or_else(|| map.get("heading"))
        .and_then(Value::as_str)
        .unwrap_or("");

    let mut html = String::new();
    if !title.is_empty() {
        html.push_str(&format!("<h2>{title}</h2>"));
    }

    match doc_type {
        DocType::Pptx => {
            let bullets = map
                .get("bullets")
                .or_else(|| map.get("points"))
                .and_then(Value::as_array);
            if let Some(bullets) = bullets {
                html.push_str("<ul>");
                for bullet in bullets {
                    let text = bullet.as_str().map(str::to_string).unwrap_or_else(|| bullet.to_string());
                    html.push_str(&format!("<li>{text}</li>"));
                }
                html.push_str("</ul>");
            }
            if let Some(notes) = map.get("notes").and_then(Value::as_str) {
                html.push_str(&format!("<p class=\"notes\">{notes}</p>"));
            }
        }
        DocType::Docx => {
            let paragraphs = map
                .get("paragraphs")
                .or_else(|| map.get("body"))
                .and_then(Value::as_array);
            if let Some(paragraphs) = paragraphs {
                for paragraph in paragraphs.iter().take(MAX_DOC_PARAGRAPHS) {
                    let text = paragraph
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| paragraph.to_string());
                    html.push_str(&format!("<p>{text}</p>"));
                }
            } else if let Some(free) = map
                .get("text")
                .or_else(|| map.get("content"))
                .and_then(Value::as_str)
            {
                for paragraph in group_sentences(free) {
                    html.push_str(&format!("<p>{paragraph}</p>"));
                }
            }
        }
    }
    html
}

/// Wrap non-HTML text into a docType-appropriate fragment.
fn wrap_plain_text(text: &str, doc_type: DocType, context: Option<&str>) -> String {
    match doc_type {
        DocType::Pptx => {
            let bullets: String = text
                .split(['\n', '.'])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .take(6)
                .map(|s| format!("<li>{s}</li>"))
                .collect();
            format!("<h2>{}</h2><ul>{bullets}</ul>", context.unwrap_or("Slide"))
        }
        DocType::Docx => group_sentences(text)
            .into_iter()
            .map(|p| format!("<p>{p}</p>"))
            .collect(),
    }
}

/// Group sentences roughly three to a paragraph, capped at
/// [`MAX_DOC_PARAGRAPHS`].
fn group_sentences(text: &str) -> Vec<String> {
    let sentences: Vec<&str> = text
        .split_inclusive(['.', '?', '!'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.is_empty() {
        let trimmed = text.trim();
        return if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        };
    }
    sentences
        .chunks(3)
        .take(MAX_DOC_PARAGRAPHS)
        .map(|chunk| chunk.join(" "))
        .collect()
}

fn strip_markdown_fences(content: &str) -> String {
    content
        .replace("```html", "")
        .replace("```json", "")
        .replace("```", "")
}

/// Deterministic mock generation output.
fn mock_generate(context: Option<&str>, doc_type: DocType) -> String {
    match doc_type {
        DocType::Pptx => {
            let title = context.unwrap_or("Slide");
            let bullets: String = (1..=3)
                .map(|i| format!("<li>{title} point {i}</li>"))
                .collect();
            format!("<h2>{title}</h2><ul>{bullets}</ul>")
        }
        DocType::Docx => {
            let title = context.unwrap_or("Section");
            let paragraphs: String = (1..=3)
                .map(|i| format!("<p>This is a sample paragraph {i} for {title}.</p>"))
                .collect();
            format!("<h2>{title}</h2>{paragraphs}")
        }
    }
}

/// Mock refinement: append a marked refinement note.
fn mock_refine(existing: &str, prompt: &str) -> String {
    format!("{existing}\n\nRefined with prompt: {prompt}")
}

/// Mock outline: five deterministic titles.
fn mock_outline(topic: &str, doc_type: DocType) -> Vec<String> {
    let unit = match doc_type {
        DocType::Pptx => "Slide",
        DocType::Docx => "Section",
    };
    (1..=5).map(|i| format!("{topic} - {unit} {i}")).collect()
}
