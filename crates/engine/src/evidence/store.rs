use biaslens_common::types::{EvidenceItem, SourceDescriptor};
use biaslens_common::EvidenceId;

/// Next free `E<n>` id: one past the largest numeric suffix among the
/// existing ids, or `E1` when none match the pattern.
///
/// Ids that do not match `E<integer>` are ignored, so gaps and foreign ids
/// never cause a collision. Returns `None` once the suffix space is
/// exhausted (an existing `E18446744073709551615`).
pub fn allocate_id(existing: &[EvidenceItem]) -> Option<EvidenceId> {
    let next = match existing
        .iter()
        .filter_map(|item| item.id.numeric_suffix())
        .max()
    {
        Some(max) => max.checked_add(1)?,
        None => 1,
    };
    Some(EvidenceId::numbered(next))
}

/// Append-only registry of verbatim evidence spans for one analysis run.
///
/// Owned by a single run: concurrent analyses each build their own store.
/// The caller's pre-existing list is copied in, never mutated.
#[derive(Clone, Debug, Default)]
pub struct EvidenceStore {
    items: Vec<EvidenceItem>,
}

impl EvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a copy of an existing evidence list.
    pub fn from_items(existing: &[EvidenceItem]) -> Self {
        Self {
            items: existing.to_vec(),
        }
    }

    /// Anchor `text[start..end]` as a new evidence item.
    ///
    /// Fails closed (returns `None`, store untouched) when the range is
    /// empty or reversed, runs past the text, splits a UTF-8 character, or
    /// slices only whitespace. An identical span already in the store
    /// returns its existing id instead of a duplicate.
    pub fn add_span(
        &mut self,
        text: &str,
        start: usize,
        end: usize,
        source: &SourceDescriptor,
        why_relevant: &str,
    ) -> Option<EvidenceId> {
        if end <= start || end > text.len() {
            tracing::debug!(start, end, len = text.len(), "Evidence span rejected: bad range");
            metrics::counter!("evidence.anchor_dropped", "reason" => "range").increment(1);
            return None;
        }
        let Some(quote) = text.get(start..end) else {
            tracing::debug!(start, end, "Evidence span rejected: not on a char boundary");
            metrics::counter!("evidence.anchor_dropped", "reason" => "boundary").increment(1);
            return None;
        };
        if quote.trim().is_empty() {
            tracing::debug!(start, end, "Evidence span rejected: blank quote");
            metrics::counter!("evidence.anchor_dropped", "reason" => "blank").increment(1);
            return None;
        }

        if let Some(existing) = self
            .items
            .iter()
            .find(|i| i.start_offset == start && i.end_offset == end && i.quote == quote)
        {
            return Some(existing.id.clone());
        }

        let Some(id) = allocate_id(&self.items) else {
            tracing::warn!(items = self.items.len(), "Evidence id space exhausted");
            metrics::counter!("evidence.anchor_dropped", "reason" => "id_exhausted").increment(1);
            return None;
        };
        self.items.push(EvidenceItem {
            id: id.clone(),
            quote: quote.to_string(),
            start_offset: start,
            end_offset: end,
            why_relevant: why_relevant.to_string(),
            source: source.clone(),
        });
        metrics::counter!("evidence.anchor_created").increment(1);
        Some(id)
    }

    /// Locate `quote` verbatim in `text` (first occurrence) and anchor it.
    /// Quotes that do not occur exactly are dropped, never approximated.
    pub fn anchor_quote(
        &mut self,
        text: &str,
        quote: &str,
        source: &SourceDescriptor,
        why_relevant: &str,
    ) -> Option<EvidenceId> {
        if quote.trim().is_empty() {
            return None;
        }
        let Some(start) = text.find(quote) else {
            tracing::debug!(quote_len = quote.len(), "Quote not found verbatim in source");
            metrics::counter!("evidence.anchor_dropped", "reason" => "not_found").increment(1);
            return None;
        };
        self.add_span(text, start, start + quote.len(), source, why_relevant)
    }

    pub fn get(&self, id: &EvidenceId) -> Option<&EvidenceItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn contains(&self, id: &EvidenceId) -> bool {
        self.get(id).is_some()
    }

    pub fn items(&self) -> &[EvidenceItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Hand the accumulated list back to the caller as a new vector.
    pub fn into_items(self) -> Vec<EvidenceItem> {
        self.items
    }
}
