//! Lyrics extraction from song web pages.
//!
//! Lyrics pages change markup over time, so extraction walks an ordered list
//! of selector strategies, newest layout first. The first strategy that
//! matches at least one container AND yields non-empty text wins; a strategy
//! that matches only empty containers falls through to the next one.
//!
//! Line breaks (`<br>`) are turned into `\n` while the container text is
//! being collected, so visual breaks survive the text serialization.

use scraper::{ElementRef, Html, Node, Selector};

use super::domain::LyricsError;

/// Separator between the texts of multiple matching containers
const CONTAINER_SEPARATOR: &str = "\n\n";

/// One way of locating lyrics containers on a page.
#[derive(Debug, Clone, Copy)]
pub struct SelectorStrategy {
    /// Short name for logs
    pub name: &'static str,
    /// CSS selector for the lyrics container(s)
    pub css: &'static str,
}

/// Strategies in the order the site adopted its layouts.
pub const STRATEGIES: [SelectorStrategy; 3] = [
    SelectorStrategy {
        name: "lyrics-container",
        css: r#"div[class^="Lyrics__Container"]"#,
    },
    SelectorStrategy {
        name: "legacy-lyrics",
        css: ".lyrics",
    },
    SelectorStrategy {
        name: "song-page-wrapper",
        css: r#"div[class^="SongPageGriddesktop__LyricsWrapper"]"#,
    },
];

impl SelectorStrategy {
    /// Text of all matching containers, or `None` on no match / blank text.
    pub fn apply(&self, document: &Html) -> Option<String> {
        let selector = match Selector::parse(self.css) {
            Ok(selector) => selector,
            Err(e) => {
                tracing::warn!("Invalid selector {} ({}): {:?}", self.name, self.css, e);
                return None;
            }
        };

        let blocks: Vec<String> = document.select(&selector).map(container_text).collect();
        if blocks.is_empty() {
            tracing::debug!("Selector {} matched nothing", self.name);
            return None;
        }

        let text = blocks.join(CONTAINER_SEPARATOR).trim().to_string();
        if text.is_empty() {
            tracing::debug!(
                "Selector {} matched {} empty container(s), falling through",
                self.name,
                blocks.len()
            );
            return None;
        }

        tracing::debug!("Selector {} matched {} container(s)", self.name, blocks.len());
        Some(text)
    }
}

/// Extract lyrics from a page using the default strategies.
pub fn extract(html: &str) -> Result<String, LyricsError> {
    extract_with(html, &STRATEGIES)
}

/// Extract lyrics trying `strategies` in order.
pub fn extract_with(html: &str, strategies: &[SelectorStrategy]) -> Result<String, LyricsError> {
    let document = Html::parse_document(html);

    strategies
        .iter()
        .find_map(|strategy| strategy.apply(&document))
        .ok_or_else(|| {
            tracing::debug!("Lyrics not found with any known selector");
            LyricsError::LyricsNotFound
        })
}

/// Serialize a container's text, with every `<br>` emitted as a newline
fn container_text(container: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in container.descendants() {
        match node.value() {
            Node::Text(fragment) => text.push_str(fragment),
            Node::Element(element) if element.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}
