//! Citation sources attached to generated answers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::html;
use crate::resolver::LinkService;

/// A source behind an inline citation such as `[3]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    /// Plain text quoted without a backing document.
    Text { value: String },
    /// A chunk retrieved from an indexed document.
    Document {
        title: String,
        id: String,
        #[serde(default)]
        content: String,
        /// Encoded reference to the parent document (`parent_id` upstream).
        #[serde(default, alias = "parent_id")]
        parent_ref: Option<String>,
        #[serde(default)]
        score: Option<f64>,
    },
}

impl Source {
    /// Key used to collapse chunks of the same document: the parent
    /// reference, else the normalized title.
    fn document_key(&self) -> Option<String> {
        match self {
            Source::Text { .. } => None,
            Source::Document {
                title, parent_ref, ..
            } => Some(
                parent_ref
                    .as_deref()
                    .filter(|r| !r.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| title.trim().to_lowercase()),
            ),
        }
    }

    fn score(&self) -> f64 {
        match self {
            Source::Document { score, .. } => score.unwrap_or(0.0),
            Source::Text { .. } => 0.0,
        }
    }
}

/// Keeps the highest-scoring chunk per document in first-seen order.
/// Text sources are never merged.
pub fn dedupe_sources(sources: Vec<Source>) -> Vec<Source> {
    let mut out: Vec<Source> = Vec::with_capacity(sources.len());
    let mut seen: HashMap<String, usize> = HashMap::new();

    for source in sources {
        match source.document_key() {
            None => out.push(source),
            Some(key) => match seen.get(&key) {
                Some(&idx) => {
                    if source.score() > out[idx].score() {
                        out[idx] = source;
                    }
                }
                None => {
                    seen.insert(key, out.len());
                    out.push(source);
                }
            },
        }
    }

    out
}

/// Renders one entry of the citation panel.
pub fn render_citation(
    index: usize,
    source: &Source,
    service: &LinkService,
    show_diagnostics: bool,
) -> String {
    match source {
        Source::Text { value } => format!(
            r#"<li class="doclink-citation" value="{index}"><span class="doclink-citation-text">{}</span></li>"#,
            html::escape(value)
        ),
        Source::Document {
            title, parent_ref, ..
        } => {
            let link = service.create_download_link(
                parent_ref.as_deref().unwrap_or_default(),
                show_diagnostics,
            );
            format!(
                r#"<li class="doclink-citation" value="{index}"><span class="doclink-citation-title">[{index}] {}</span> {}</li>"#,
                html::escape(title),
                link.html
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolverConfig;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    fn doc(title: &str, parent: Option<&str>, score: f64) -> Source {
        Source::Document {
            title: title.to_string(),
            id: format!("{title}-{score}"),
            content: String::new(),
            parent_ref: parent.map(str::to_string),
            score: Some(score),
        }
    }

    #[test]
    fn deserializes_tagged_sources() {
        let json = r#"[
            {"kind": "text", "value": "quoted"},
            {"kind": "document", "title": "Handbook", "id": "1", "parent_id": "aGk="}
        ]"#;
        let sources: Vec<Source> = serde_json::from_str(json).unwrap();
        assert_eq!(sources[0], Source::Text { value: "quoted".into() });
        match &sources[1] {
            Source::Document { parent_ref, score, .. } => {
                assert_eq!(parent_ref.as_deref(), Some("aGk="));
                assert!(score.is_none());
            }
            _ => panic!("expected document"),
        }
    }

    #[test]
    fn dedupe_keeps_best_chunk_in_first_position() {
        let out = dedupe_sources(vec![
            doc("A", Some("ref-a"), 0.2),
            doc("B", Some("ref-b"), 0.5),
            doc("A again", Some("ref-a"), 0.9),
            Source::Text { value: "t".into() },
            Source::Text { value: "t".into() },
        ]);
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], doc("A again", Some("ref-a"), 0.9));
        assert_eq!(out[1], doc("B", Some("ref-b"), 0.5));
    }

    #[test]
    fn dedupe_falls_back_to_title() {
        let out = dedupe_sources(vec![doc(" Policy ", None, 0.3), doc("policy", Some(""), 0.1)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0], doc(" Policy ", None, 0.3));
    }

    #[test]
    fn renders_document_with_link() {
        let svc = LinkService::new(&ResolverConfig::default()).unwrap();
        let src = doc(
            "<Handbook>",
            Some(&STANDARD.encode("https://example.com/h.pdf")),
            1.0,
        );
        let html = render_citation(3, &src, &svc, false);
        assert!(html.contains("[3] &lt;Handbook&gt;"));
        assert!(html.contains(r#"href="https://example.com/h.pdf""#));
    }

    #[test]
    fn renders_missing_reference_as_notice() {
        let svc = LinkService::new(&ResolverConfig::default()).unwrap();
        let html = render_citation(1, &doc("X", None, 0.0), &svc, false);
        assert!(html.contains("No Base64 URL provided"));
    }

    #[test]
    fn renders_text_escaped() {
        let svc = LinkService::new(&ResolverConfig::default()).unwrap();
        let html = render_citation(2, &Source::Text { value: "<i>x</i>".into() }, &svc, false);
        assert!(html.contains("&lt;i&gt;x&lt;/i&gt;"));
    }
}
