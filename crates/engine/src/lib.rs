pub mod claims;
pub mod config;
pub mod evidence;
pub mod omissions;
pub mod pipeline;
pub mod rating;
pub mod text;
pub mod timeline;

pub use pipeline::{analyze, analyze_with_inferential};
