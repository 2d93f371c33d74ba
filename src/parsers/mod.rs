pub mod html;
pub mod json;
pub mod text;

#[cfg(test)]
mod tests;

pub use html::extract_readable;
pub use json::parse_event_summary;

/// Readable content of a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadableText {
    /// Article title as detected by the extractor
    pub title: Option<String>,
    /// Normalized article text, paragraphs separated by blank lines
    pub content: String,
}

impl ReadableText {
    /// Creates readable text from a title and content
    pub fn new(title: Option<String>, content: String) -> Self {
        Self { title, content }
    }

    /// Number of characters of content
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Text handed to the model: the title on its own paragraph, then the content
    ///
    /// The title is skipped when the content already opens with it.
    pub fn prompt_text(&self) -> String {
        match &self.title {
            Some(title) if !self.content.starts_with(title.as_str()) => {
                format!("{title}\n\n{}", self.content)
            }
            _ => self.content.clone(),
        }
    }
}
