use serde::{Deserialize, Serialize};

use crate::ids::EvidenceId;

/// Where the source text came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Text,
    Url,
}

/// Descriptor of the document an evidence span was cut from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    #[serde(rename = "type", default)]
    pub kind: SourceKind,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SourceDescriptor {
    /// Descriptor for pasted text. An empty title is allowed.
    pub fn text(title: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Text,
            title: title.into(),
            url: None,
        }
    }

    /// Descriptor for a fetched page. Blank URLs degrade to a text source.
    pub fn url(title: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        if url.trim().is_empty() {
            return Self::text(title);
        }
        Self {
            kind: SourceKind::Url,
            title: title.into(),
            url: Some(url),
        }
    }
}

/// One verbatim span of the source text.
///
/// Invariant: `&source_text[start_offset..end_offset] == quote` (UTF-8 byte
/// offsets) and `quote` is not blank. Items are only created by the evidence
/// store's writer and are never mutated, reordered, or removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub id: EvidenceId,
    pub quote: String,
    pub start_offset: usize,
    pub end_offset: usize,
    /// Why this span was captured (which detector or builder stage).
    #[serde(default)]
    pub why_relevant: String,
    #[serde(default)]
    pub source: SourceDescriptor,
}
