use crate::parsers::ReadableText;
use crate::parsers::text::{self, TextOptions};
use dom_smoothie::Readability;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static INLINE_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)style\s*=\s*(?:"[^"]*"|'[^']*')"#).expect("inline style pattern is valid")
});

/// Removes inline `style="..."` attributes before extraction
pub fn strip_inline_styles(html: &str) -> Cow<'_, str> {
    INLINE_STYLE.replace_all(html, "")
}

/// Runs a Readability pass over a page and returns its article text
///
/// Returns `None` when no article is detected or the article has no text.
pub fn extract_readable(html: &str, url: Option<&str>) -> Option<ReadableText> {
    let stripped = strip_inline_styles(html);

    let mut readability = match Readability::new(stripped.as_ref(), url, None) {
        Ok(readability) => readability,
        Err(e) => {
            ::log::debug!("Readability could not load document: {}", e);
            return None;
        }
    };

    let article = match readability.parse() {
        Ok(article) => article,
        Err(e) => {
            ::log::debug!("Readability found no article: {}", e);
            return None;
        }
    };

    let content = text::normalize(&article.text_content, &TextOptions::paragraphs());
    if content.is_empty() {
        return None;
    }

    let title = text::collapse_whitespace(&article.title);
    let title = (!title.is_empty()).then_some(title);

    ::log::debug!(
        "Extracted {} chars of readable text (title: {:?})",
        content.len(),
        title
    );
    Some(ReadableText::new(title, content))
}
