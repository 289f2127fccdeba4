use serde::{Deserialize, Serialize};

/// Whether an analysis module executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    Run,
    NotRun,
}

impl ModuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::NotRun => "not_run",
        }
    }
}

/// Whether a module had enough usable data points to aggregate.
///
/// `InsufficientData` results carry zero counts and no score; callers must
/// handle that state explicitly rather than assume a neutral default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sufficiency {
    Sufficient,
    InsufficientData,
}

impl Sufficiency {
    pub fn is_sufficient(&self) -> bool {
        matches!(self, Self::Sufficient)
    }
}
