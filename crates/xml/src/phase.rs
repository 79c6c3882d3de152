//! Traversal state of one codec call.

use crate::error::{CodecError, Result};

/// Where a call stands. A call starts `Idle`, is `Traversing` while objects
/// are being visited and ends either `Done` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Idle,
    Traversing { depth: usize },
    Done,
    Failed,
}

/// Tracks the phase and object nesting of one traversal.
#[derive(Debug)]
pub(crate) struct Traversal {
    phase: Phase,
    max_depth: usize,
}

impl Traversal {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            phase: Phase::Idle,
            max_depth,
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Enters one object deeper.
    pub(crate) fn enter(&mut self) -> Result<()> {
        let depth = match self.phase {
            Phase::Idle => 1,
            Phase::Traversing { depth } => depth + 1,
            Phase::Done | Phase::Failed => {
                return Err(CodecError::Config(format!(
                    "traversal already ended in phase {:?}",
                    self.phase
                )));
            }
        };
        if depth > self.max_depth {
            self.phase = Phase::Failed;
            return Err(CodecError::DepthExceeded {
                max: self.max_depth,
            });
        }
        self.phase = Phase::Traversing { depth };
        Ok(())
    }

    /// Leaves the current object.
    pub(crate) fn leave(&mut self) {
        if let Phase::Traversing { depth } = self.phase {
            self.phase = Phase::Traversing {
                depth: depth.saturating_sub(1),
            };
        }
    }

    /// Ends the traversal with the outcome of the call.
    pub(crate) fn finish<T>(&mut self, result: Result<T>) -> Result<T> {
        self.phase = if result.is_ok() {
            Phase::Done
        } else {
            Phase::Failed
        };
        result
    }
}
