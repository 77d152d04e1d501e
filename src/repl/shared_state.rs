use std::sync::{Arc, PoisonError, RwLock};

use crate::dialect::Dialect;

/// State shared between the REPL loop and its reedline components.
///
/// The completer and highlighter are boxed into the line editor, so the
/// active dialect lives behind a lock they all read.
#[derive(Debug, Clone)]
pub struct SharedState {
    dialect: Arc<RwLock<Dialect>>,
}

impl SharedState {
    /// Create a new shared state.
    ///
    /// * `dialect` - Initially active dialect
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect: Arc::new(RwLock::new(dialect)),
        }
    }

    /// Currently active dialect
    pub fn dialect(&self) -> Dialect {
        *self.dialect.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch the active dialect
    pub fn set_dialect(&self, dialect: Dialect) {
        *self.dialect.write().unwrap_or_else(PoisonError::into_inner) = dialect;
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new(Dialect::Logs)
    }
}
