//! Evidence anchoring: the append-only registry every detector cites through.

mod segment;
mod store;

pub use segment::segment_source;
pub use store::{allocate_id, EvidenceStore};
