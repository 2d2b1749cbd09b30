//! Non-fatal compiler warnings.

use std::fmt;

/// A problem detected during compilation that does not stop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileWarning {
    /// An async API has no entry in the event map; its event type stays unset.
    MissingAsyncEvent {
        api: String,
    },
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileWarning::MissingAsyncEvent { api } => {
                write!(f, "No async event present in map for {}", api)
            }
        }
    }
}
