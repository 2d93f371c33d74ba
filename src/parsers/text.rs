/// Options for normalizing extracted text
#[derive(Debug, Clone, Copy)]
pub struct TextOptions {
    /// Keep paragraph structure (exactly one blank line between paragraphs)
    pub preserve_paragraphs: bool,
    /// Keep single newlines within paragraphs
    pub preserve_line_breaks: bool,
    /// Collapse runs of spaces and tabs into a single space
    pub normalize_whitespace: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            preserve_paragraphs: false,
            preserve_line_breaks: false,
            normalize_whitespace: true,
        }
    }
}

impl TextOptions {
    /// Options used for article text handed to the model
    pub fn paragraphs() -> Self {
        Self {
            preserve_paragraphs: true,
            ..Self::default()
        }
    }
}

/// Normalizes text according to `options`
///
/// Lines are trimmed, blank lines mark paragraph boundaries and runs of
/// blank lines collapse into one boundary.
pub fn normalize(text: &str, options: &TextOptions) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let line_separator = if options.preserve_line_breaks { "\n" } else { " " };
    let paragraph_separator = if options.preserve_paragraphs { "\n\n" } else { " " };

    split_into_paragraphs(text)
        .iter()
        .map(|paragraph| {
            let lines: Vec<String> = paragraph
                .iter()
                .map(|line| {
                    if options.normalize_whitespace {
                        collapse_whitespace(line)
                    } else {
                        line.to_string()
                    }
                })
                .collect();
            let joined = lines.join(line_separator);
            if options.normalize_whitespace && !options.preserve_line_breaks {
                collapse_whitespace(&joined)
            } else {
                joined
            }
        })
        .collect::<Vec<_>>()
        .join(paragraph_separator)
}

/// Splits text into paragraphs of trimmed, non-empty lines
pub fn split_into_paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut paragraphs: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(trimmed);
        }
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}

/// Collapses all whitespace runs in a segment into single spaces
pub fn collapse_whitespace(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}
