//! Sitemap discovery.
//!
//! Only the alternate-language links of a `urlset` sitemap are read:
//!
//! ```xml
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:xhtml="http://www.w3.org/1999/xhtml">
//!   <url>
//!     <loc>https://example.com/en/event</loc>
//!     <xhtml:link rel="alternate" hreflang="de" href="https://example.com/de/event"/>
//!   </url>
//! </urlset>
//! ```

use crate::error::{DigestError, Result};
use regex::Regex;
use roxmltree::{Document, Node};
use std::path::Path;
use std::sync::LazyLock;

/// Namespace of the `xhtml:link` elements
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

static URLSET_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<urlset\b").expect("urlset pattern is valid"));

/// Reads the sitemap at `path` and returns the hrefs tagged with `language`
pub fn load_sitemap(path: impl AsRef<Path>, language: &str) -> Result<Vec<String>> {
    let path = path.as_ref();
    ::log::debug!("Reading sitemap from {}", path.display());

    let xml = std::fs::read_to_string(path).map_err(|source| DigestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_sitemap(&xml, language)
}

/// Returns the `href` of every `xhtml:link` whose `hreflang` equals `language`, in document order
///
/// Sitemaps that use the `xhtml:` prefix without declaring it are read as if
/// `urlset` declared it.
pub fn parse_sitemap(xml: &str, language: &str) -> Result<Vec<String>> {
    match Document::parse(xml) {
        Ok(doc) => collect_links(&doc, language),
        Err(e) => match declare_xhtml_prefix(xml, &e) {
            Some(patched) => {
                ::log::warn!(
                    "Sitemap uses an undeclared xhtml prefix, assuming {}",
                    XHTML_NAMESPACE
                );
                let doc = Document::parse(&patched)?;
                collect_links(&doc, language)
            }
            None => Err(e.into()),
        },
    }
}

/// Adds the missing `xmlns:xhtml` declaration to the `urlset` start tag
fn declare_xhtml_prefix(xml: &str, error: &roxmltree::Error) -> Option<String> {
    if !matches!(error, roxmltree::Error::UnknownNamespace(prefix, _) if prefix == "xhtml") {
        return None;
    }

    let end = URLSET_TAG.find(xml)?.end();
    Some(format!(
        "{} xmlns:xhtml=\"{}\"{}",
        &xml[..end],
        XHTML_NAMESPACE,
        &xml[end..]
    ))
}

fn collect_links(doc: &Document<'_>, language: &str) -> Result<Vec<String>> {
    let root = doc.root_element();

    if root.tag_name().name() != "urlset" {
        return Err(DigestError::MissingUrlset(
            root.tag_name().name().to_string(),
        ));
    }

    let hrefs: Vec<String> = root
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "url")
        .flat_map(|entry| entry.children().filter(is_xhtml_link))
        .filter(|link| link.attribute("hreflang") == Some(language))
        .filter_map(|link| match link.attribute("href") {
            Some(href) => Some(href.to_string()),
            None => {
                ::log::debug!(
                    "Skipping hreflang=\"{}\" link without href at byte {}",
                    language,
                    link.range().start
                );
                None
            }
        })
        .collect();

    ::log::debug!("Sitemap yielded {} '{}' links", hrefs.len(), language);
    Ok(hrefs)
}

fn is_xhtml_link(node: &Node<'_, '_>) -> bool {
    node.is_element()
        && node.tag_name().name() == "link"
        && node.tag_name().namespace() == Some(XHTML_NAMESPACE)
}
