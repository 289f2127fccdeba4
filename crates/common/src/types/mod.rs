mod claim;
mod evidence;
mod issue;
mod levels;
mod omission;
mod rating;
mod report;
mod status;
mod timeline;

pub use claim::*;
pub use evidence::*;
pub use issue::*;
pub use levels::*;
pub use omission::*;
pub use rating::*;
pub use report::*;
pub use status::*;
pub use timeline::*;
