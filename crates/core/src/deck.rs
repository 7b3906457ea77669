//! Deck model: the transient description of a presentation handed to the
//! PPTX renderer.
//!
//! A deck is built either directly from a client-supplied JSON payload or
//! from a project's sections via [`build_deck_model`]. It is consumed once
//! by the renderer and never persisted.

use serde::{Deserialize, Serialize};

use crate::types::DocType;

/// Bullets per summary slide. Paragraphs beyond this are dropped from the
/// deck (the underlying section content is untouched).
pub const MAX_SECTION_BULLETS: usize = 6;

/// Background fill style for a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BgType {
    #[default]
    Solid,
    Gradient,
    Image,
}

/// Two-stop gradient descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gradient {
    pub from: String,
    pub to: String,
}

/// Named styling choices applied to every slide of a deck.
///
/// Field names follow the wire format used by the client (`accentColor`,
/// `fontTitle`, ...). All styling is best-effort: the renderer embeds font
/// names and colors, but substitution on the viewing machine is out of our
/// hands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSpec {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub accent_color: Option<String>,
    #[serde(default)]
    pub bg_color: Option<String>,
    #[serde(default)]
    pub bg_type: BgType,
    #[serde(default)]
    pub bg_gradient: Option<Gradient>,
    #[serde(default)]
    pub font_title: Option<String>,
    #[serde(default)]
    pub font_body: Option<String>,
    #[serde(default)]
    pub title_font_size: Option<u32>,
    #[serde(default)]
    pub subtitle_font_size: Option<u32>,
    #[serde(default)]
    pub heading_font_size: Option<u32>,
    #[serde(default)]
    pub body_font_size: Option<u32>,
    #[serde(default)]
    pub layout_hints: Option<serde_json::Value>,
}

impl TemplateSpec {
    /// Accent color with the built-in default applied.
    pub fn accent_or_default(&self) -> &str {
        self.accent_color.as_deref().unwrap_or("0A74DA")
    }

    /// Background color with the built-in default applied.
    pub fn bg_or_default(&self) -> &str {
        self.bg_color.as_deref().unwrap_or("FFFFFF")
    }
}

/// Slide flavor. Unknown types are coerced to `Summary` at the API edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Title,
    Summary,
    Experience,
    Skills,
    Projects,
    Education,
    Contact,
}

/// One slide of a deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    #[serde(rename = "type")]
    pub kind: SlideKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Structured per-item payloads for experience/projects/education
    /// slides. Free-form JSON; the renderer extracts what it understands.
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

impl Slide {
    /// A title slide with the given heading and subtitle.
    pub fn title_slide(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Slide {
            kind: SlideKind::Title,
            title: Some(title.into()),
            subtitle: Some(subtitle.into()),
            bullets: Vec::new(),
            notes: None,
            images: Vec::new(),
            items: Vec::new(),
        }
    }

    /// A summary slide with a heading and bullet list.
    pub fn summary_slide(title: impl Into<String>, bullets: Vec<String>) -> Self {
        Slide {
            kind: SlideKind::Summary,
            title: Some(title.into()),
            subtitle: None,
            bullets,
            notes: None,
            images: Vec::new(),
            items: Vec::new(),
        }
    }
}

/// The full deck handed to the PPTX renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckModel {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    pub template: TemplateSpec,
    pub slides: Vec<Slide>,
}

/// Section input to [`build_deck_model`]: a title plus raw content.
#[derive(Debug, Clone)]
pub struct SectionContent {
    pub title: String,
    pub content: String,
}

/// Build a deck from a project's ordered sections.
///
/// The first slide is always a title slide (project title + docType label
/// as subtitle). Each section becomes a summary slide whose bullets are the
/// first [`MAX_SECTION_BULLETS`] non-empty paragraphs of its content.
/// Sections with blank content produce a slide with zero bullets.
pub fn build_deck_model(
    title: &str,
    author: Option<&str>,
    doc_type: DocType,
    sections: &[SectionContent],
    template: TemplateSpec,
) -> DeckModel {
    let mut slides = Vec::with_capacity(sections.len() + 1);
    slides.push(Slide::title_slide(title, doc_type.label()));

    for section in sections {
        slides.push(Slide::summary_slide(
            section.title.clone(),
            section_bullets(&section.content),
        ));
    }

    DeckModel {
        title: title.to_string(),
        author: author.map(str::to_string),
        template,
        slides,
    }
}

/// Split section content into at most [`MAX_SECTION_BULLETS`] bullet lines.
///
/// Content is split on blank-line boundaries. Generated content is often an
/// HTML fragment, so block-level closing tags are normalized to paragraph
/// breaks first and any remaining tags are stripped from each bullet.
pub fn section_bullets(content: &str) -> Vec<String> {
    split_paragraphs(content)
        .into_iter()
        .take(MAX_SECTION_BULLETS)
        .collect()
}

/// All non-empty paragraphs of `content`, in order.
pub fn split_paragraphs(content: &str) -> Vec<String> {
    normalize_block_breaks(content)
        .split("\n\n")
        .map(|p| strip_tags(p).trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Replace closing block tags (`</p>`, `</li>`, `</h1>`..`</h6>`, `<br>`)
/// with blank lines so HTML fragments split the same way plain text does.
fn normalize_block_breaks(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail.find('>') {
            Some(end) => {
                let tag = tail[1..end].trim().to_ascii_lowercase();
                if is_block_break(&tag) {
                    out.push_str("\n\n");
                } else {
                    // keep the tag; strip_tags removes it per-paragraph
                    out.push_str(&tail[..=end]);
                }
                rest = &tail[end + 1..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn is_block_break(tag: &str) -> bool {
    matches!(
        tag,
        "/p" | "/li" | "/ul" | "/ol" | "/div" | "br" | "br/" | "br /"
    ) || (tag.starts_with("/h") && tag.len() == 3 && tag.as_bytes()[2].is_ascii_digit())
}

/// Remove any remaining `<...>` spans from a paragraph.
fn strip_tags(paragraph: &str) -> String {
    let mut out = String::with_capacity(paragraph.len());
    let mut in_tag = false;
    for c in paragraph.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// The three built-in template descriptors offered by the template
/// suggestion endpoint.
pub fn builtin_templates() -> Vec<TemplateSpec> {
    vec![
        TemplateSpec {
            name: "professional_clean".to_string(),
            description: Some("Clean corporate look with a blue accent".to_string()),
            accent_color: Some("0A74DA".to_string()),
            bg_color: Some("FFFFFF".to_string()),
            bg_type: BgType::Solid,
            bg_gradient: None,
            font_title: Some("Calibri".to_string()),
            font_body: Some("Calibri".to_string()),
            title_font_size: Some(40),
            subtitle_font_size: Some(18),
            heading_font_size: Some(22),
            body_font_size: Some(16),
            layout_hints: None,
        },
        TemplateSpec {
            name: "modern_minimal".to_string(),
            description: Some("Sparse layout, dark text on a light canvas".to_string()),
            accent_color: Some("111827".to_string()),
            bg_color: Some("F9FAFB".to_string()),
            bg_type: BgType::Solid,
            bg_gradient: None,
            font_title: Some("Helvetica".to_string()),
            font_body: Some("Helvetica".to_string()),
            title_font_size: Some(44),
            subtitle_font_size: Some(18),
            heading_font_size: Some(24),
            body_font_size: Some(14),
            layout_hints: None,
        },
        TemplateSpec {
            name: "creative_portfolio".to_string(),
            description: Some("Warm gradient background for portfolio decks".to_string()),
            accent_color: Some("D97706".to_string()),
            bg_color: Some("FFF7ED".to_string()),
            bg_type: BgType::Gradient,
            bg_gradient: Some(Gradient {
                from: "FFF7ED".to_string(),
                to: "FDE68A".to_string(),
            }),
            font_title: Some("Georgia".to_string()),
            font_body: Some("Georgia".to_string()),
            title_font_size: Some(40),
            subtitle_font_size: Some(20),
            heading_font_size: Some(22),
            body_font_size: Some(16),
            layout_hints: None,
        },
    ]
}

/// The template used when the client supplies none.
pub fn default_template() -> TemplateSpec {
    builtin_templates()
        .into_iter()
        .next()
        .expect("builtin template list is non-empty")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, content: &str) -> SectionContent {
        SectionContent {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_first_slide_is_title() {
        let deck = build_deck_model(
            "Quarterly Review",
            Some("alice"),
            DocType::Pptx,
            &[section("Intro", "Hello")],
            default_template(),
        );
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].kind, SlideKind::Title);
        assert_eq!(deck.slides[0].title.as_deref(), Some("Quarterly Review"));
        assert_eq!(deck.slides[0].subtitle.as_deref(), Some("Presentation"));
    }

    #[test]
    fn test_zero_sections_yields_single_title_slide() {
        let deck = build_deck_model("Empty", None, DocType::Pptx, &[], default_template());
        assert_eq!(deck.slides.len(), 1);
        assert_eq!(deck.slides[0].kind, SlideKind::Title);
    }

    #[test]
    fn test_eight_paragraphs_truncate_to_six_bullets() {
        let content = (1..=8)
            .map(|i| format!("Paragraph number {i}."))
            .collect::<Vec<_>>()
            .join("\n\n");
        let bullets = section_bullets(&content);
        assert_eq!(bullets.len(), MAX_SECTION_BULLETS);
        assert_eq!(bullets[0], "Paragraph number 1.");
        assert_eq!(bullets[5], "Paragraph number 6.");
    }

    #[test]
    fn test_blank_content_yields_zero_bullets() {
        assert!(section_bullets("").is_empty());
        assert!(section_bullets("   \n\n  \t \n\n ").is_empty());
    }

    #[test]
    fn test_html_blocks_split_into_bullets() {
        let html = "<h2>Heading</h2><p>First point.</p><p>Second point.</p><ul><li>Third</li></ul>";
        let bullets = section_bullets(html);
        assert_eq!(
            bullets,
            vec!["Heading", "First point.", "Second point.", "Third"]
        );
    }

    #[test]
    fn test_inline_tags_are_stripped() {
        let bullets = section_bullets("Some <b>bold</b> text.\n\nAnother <i>line</i>.");
        assert_eq!(bullets, vec!["Some bold text.", "Another line."]);
    }

    #[test]
    fn test_deck_model_wire_format() {
        let deck = build_deck_model(
            "T",
            None,
            DocType::Docx,
            &[section("S", "body")],
            default_template(),
        );
        let json = serde_json::to_value(&deck).unwrap();
        assert_eq!(json["slides"][0]["type"], "title");
        assert_eq!(json["slides"][1]["type"], "summary");
        assert_eq!(json["template"]["accentColor"], "0A74DA");
    }

    #[test]
    fn test_deck_model_deserializes_client_payload() {
        let payload = serde_json::json!({
            "title": "My Deck",
            "template": {"name": "modern_minimal", "accentColor": "111827"},
            "slides": [
                {"type": "title", "title": "My Deck", "subtitle": "Hi"},
                {"type": "skills", "title": "Skills", "bullets": ["Rust", "SQL"]}
            ]
        });
        let deck: DeckModel = serde_json::from_value(payload).unwrap();
        assert_eq!(deck.slides[1].kind, SlideKind::Skills);
        assert_eq!(deck.template.bg_type, BgType::Solid);
    }
}
