//! Omission Detector: absence of expected context near trigger phrases.
//!
//! Findings say what context is missing and why a reader might need it.
//! They never assert intent or wrongdoing.

mod detectors;
mod inferential;
mod scanner;

pub use detectors::{
    builtin_detectors, BaselineDetector, CausalBridgeDetector, ComparisonClassDetector,
    ScopeBoundaryDetector, StructuralDetector, TimeWindowDetector,
};
pub use inferential::{
    merge_candidates, InferentialCandidate, InferentialDetector, MAX_INFERENTIAL_CANDIDATES,
};
pub use scanner::OmissionScanner;

/// Ids of the built-in structural detectors.
pub const STRUCTURAL_DETECTOR_IDS: [&str; 5] =
    ["OMIT_001", "OMIT_002", "OMIT_003", "OMIT_004", "OMIT_005"];
