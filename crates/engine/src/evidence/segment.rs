use biaslens_common::config::EvidenceConfig;
use biaslens_common::types::SourceDescriptor;
use biaslens_common::EvidenceId;

use super::EvidenceStore;
use crate::text::{clip_len, sentence_spans, trim_span};

/// Cut the source text into verbatim evidence spans: paragraph blocks first,
/// then sentences to fill up to `max_segment_items`.
///
/// Long blocks are clipped to a verbatim prefix. Spans already in the store
/// are reused, not duplicated. Blank text yields nothing: there is no
/// placeholder quote. Returns the ids anchored (or reused) in order.
pub fn segment_source(
    store: &mut EvidenceStore,
    text: &str,
    source: &SourceDescriptor,
    config: &EvidenceConfig,
) -> Vec<EvidenceId> {
    let mut ids: Vec<EvidenceId> = Vec::new();
    if text.trim().is_empty() {
        return ids;
    }

    for (start, end) in paragraph_spans(text) {
        if ids.len() >= config.max_segment_items {
            break;
        }
        if let Some(id) = anchor_clipped(
            store,
            text,
            (start, end),
            config.paragraph_clip_chars,
            source,
            "Paragraph passage (verbatim prefix) for claim linking.",
        ) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }

    for (start, end) in sentence_spans(text) {
        if ids.len() >= config.max_segment_items {
            break;
        }
        if let Some(id) = anchor_clipped(
            store,
            text,
            (start, end),
            config.sentence_clip_chars,
            source,
            "Sentence passage (verbatim) for claim linking.",
        ) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }

    tracing::debug!(items = ids.len(), "Segmented source text into evidence");
    ids
}

fn anchor_clipped(
    store: &mut EvidenceStore,
    text: &str,
    (start, end): (usize, usize),
    max_chars: usize,
    source: &SourceDescriptor,
    why: &str,
) -> Option<EvidenceId> {
    let clipped_end = start + clip_len(&text[start..end], max_chars);
    let (s, e) = trim_span(text, start, clipped_end)?;
    store.add_span(text, s, e, source, why)
}

/// Blocks of consecutive non-blank lines, trimmed.
fn paragraph_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut block_start: Option<usize> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if line.trim().is_empty() {
            if let Some(start) = block_start.take() {
                if let Some(span) = trim_span(text, start, line_start) {
                    spans.push(span);
                }
            }
        } else if block_start.is_none() {
            block_start = Some(line_start);
        }
    }
    if let Some(start) = block_start {
        if let Some(span) = trim_span(text, start, text.len()) {
            spans.push(span);
        }
    }
    spans
}
