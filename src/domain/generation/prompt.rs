use super::error::GenerationError;
use crate::domain::story::{ArtStyle, Page, StoryDraft, Voice};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").expect("valid code fence pattern")
});

/// Parameters of a single story-text request
#[derive(Debug, Clone)]
pub struct StoryRequest {
    pub prompt: String,
    pub page_count: u8,
    pub art_style: ArtStyle,
    pub voice: Voice,
    pub educational_theme: Option<String>,
}

/// Instruction sent to the text model
pub fn build_story_prompt(request: &StoryRequest) -> String {
    let theme_line = match &request.educational_theme {
        Some(theme) => format!(
            "Subtly incorporate the educational theme of \"{}\".\n",
            theme
        ),
        None => String::new(),
    };

    format!(
        r#"Create a children's story about: "{prompt}".
The story must be exactly {pages} pages long.
The art style for the illustrations is {style}.
{theme_line}The story needs a clear beginning, middle, and end.
For each page, provide the page number, one paragraph of text (about 50-100 words), and a detailed prompt for an image generation model to create an illustration that matches the page's content and art style.

Return a single, valid JSON object with this exact structure:
{{
  "title": "A short, catchy title for the story",
  "pages": [
    {{
      "pageNumber": 1,
      "text": "The text for page 1.",
      "imagePrompt": "A detailed image prompt for page 1."
    }}
  ]
}}
Do not include any other text, markdown, or formatting outside of this JSON object.
"#,
        prompt = request.prompt,
        pages = request.page_count,
        style = request.art_style,
        theme_line = theme_line,
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoryPayload {
    title: Option<String>,
    pages: Option<Vec<PagePayload>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PagePayload {
    page_number: Option<i32>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    image_prompt: String,
}

/// Parse the text model's JSON into a draft; any structural problem is an
/// invalid story rather than a parse error
pub fn parse_story_response(
    response_text: &str,
    request: &StoryRequest,
) -> Result<StoryDraft, GenerationError> {
    let json = strip_code_fence(response_text);

    let payload: StoryPayload = serde_json::from_str(json).map_err(|e| {
        tracing::error!(error = %e, response = %response_text, "Failed to parse story JSON");
        GenerationError::InvalidStory
    })?;

    let title = payload
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(GenerationError::InvalidStory)?;

    let pages = payload
        .pages
        .filter(|p| !p.is_empty())
        .ok_or(GenerationError::InvalidStory)?;

    if pages.len() != request.page_count as usize {
        tracing::warn!(
            requested = request.page_count,
            received = pages.len(),
            "Story page count differs from the requested count"
        );
    }

    let pages = normalize_page_numbers(
        pages
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                Page::new(
                    p.page_number.unwrap_or(i as i32 + 1),
                    p.text,
                    p.image_prompt,
                )
            })
            .collect(),
    );

    Ok(StoryDraft {
        title,
        pages,
        voice: request.voice,
        educational_theme: request.educational_theme.clone(),
    })
}

fn strip_code_fence(text: &str) -> &str {
    match CODE_FENCE.captures(text).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str(),
        None => text.trim(),
    }
}

/// Renumber pages 1..N in their given order unless they already are
pub fn normalize_page_numbers(mut pages: Vec<Page>) -> Vec<Page> {
    let dense = pages
        .iter()
        .enumerate()
        .all(|(i, p)| p.page_number == i as i32 + 1);

    if !dense {
        tracing::warn!(
            received = ?pages.iter().map(|p| p.page_number).collect::<Vec<_>>(),
            "Renumbering non-contiguous story pages"
        );
        for (i, page) in pages.iter_mut().enumerate() {
            page.page_number = i as i32 + 1;
        }
    }

    pages
}
