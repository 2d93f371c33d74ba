pub mod ollama;
pub mod stream;

use crate::error::Result;
use async_trait::async_trait;

pub use ollama::OllamaClient;

/// A text-completion backend
#[async_trait]
pub trait Generator: Send + Sync {
    /// Human-readable model name, used in logs
    fn name(&self) -> &str;

    /// Sends `prompt` and returns the complete generated text
    async fn generate(&self, prompt: &str) -> Result<String>;
}

const INSTRUCTIONS: &str = "\
Extract the following details from the provided event listing:
- Title (verbatim)
- Date (in German format)
- Location (in German)
- Summary (about 200 words, in German)
- Category (exactly one of: {categories})
- Tags (at least 15 descriptive keywords, in German)

Respond as a JSON object in this format:
{
  \"title\": \"string\",
  \"date\": \"string\",
  \"location\": \"string\",
  \"summary\": \"string\",
  \"category\": \"string\",
  \"tags\": [\"string\", \"string\", ...]
}

Here is the event listing:
";

/// Builds the summarization prompt for one listing
pub fn build_prompt(listing: &str, categories: &[String]) -> String {
    let instructions = INSTRUCTIONS.replace("{categories}", &categories.join(", "));
    format!("{instructions}\n{listing}")
}
