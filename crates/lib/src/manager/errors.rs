//! Error types for the account lifecycle manager.
//!
//! The manager wraps store failures with the context callers need to tell
//! a failed single write apart from a failed query or a failed step of a
//! multi-step merge. "Nothing found" on a single-entity lookup is `Ok(None)`
//! at the manager API and never appears here.

use thiserror::Error;

/// The ordered steps of a user merge.
///
/// Carried by [`ManagerError::Merge`] so callers know how far a failed
/// merge got; everything before the failing step has been applied and is
/// not rolled back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeStep {
    /// Step 1: fetch the loser's open profiles
    FetchProfiles,
    /// Step 2: reassign the fetched profiles to the winner
    UpdateProfiles,
    /// Step 3: fetch the loser's keys
    FetchKeys,
    /// Step 4: reassign the fetched keys, downgrading root keys
    UpdateKeys,
    /// Step 5: delete the loser's user record
    DeleteLoser,
}

impl MergeStep {
    /// Stable 1-based index of this step in the merge sequence.
    pub fn index(&self) -> u8 {
        match self {
            MergeStep::FetchProfiles => 1,
            MergeStep::UpdateProfiles => 2,
            MergeStep::FetchKeys => 3,
            MergeStep::UpdateKeys => 4,
            MergeStep::DeleteLoser => 5,
        }
    }
}

impl std::fmt::Display for MergeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MergeStep::FetchProfiles => "fetch profiles",
            MergeStep::UpdateProfiles => "update profiles",
            MergeStep::FetchKeys => "fetch keys",
            MergeStep::UpdateKeys => "update keys",
            MergeStep::DeleteLoser => "delete merged user",
        };
        write!(f, "{} (step {})", name, self.index())
    }
}

/// Errors that can occur during account lifecycle operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ManagerError {
    /// A single insert/update/remove to the store failed.
    #[error("Write to '{collection}' failed during {operation}")]
    Write {
        /// The collection the write targeted
        collection: &'static str,
        /// The manager operation that issued the write
        operation: &'static str,
        /// The underlying store error
        #[source]
        source: Box<crate::Error>,
    },

    /// A lookup or query against the store failed.
    #[error("Read from '{collection}' failed")]
    Read {
        /// The collection the read targeted
        collection: &'static str,
        /// The underlying store error
        #[source]
        source: Box<crate::Error>,
    },

    /// A step of a user merge failed.
    ///
    /// Steps before the failing one have been applied; the system may be in
    /// an intermediate state requiring reconciliation by the caller.
    #[error("User merge failed at {step}")]
    Merge {
        /// The merge step that failed
        step: MergeStep,
        /// The underlying error
        #[source]
        source: Box<crate::Error>,
    },
}

impl ManagerError {
    /// Check if this error came from a failed single write.
    pub fn is_write_error(&self) -> bool {
        matches!(self, ManagerError::Write { .. })
    }

    /// Check if this error came from a failed lookup or query.
    pub fn is_read_error(&self) -> bool {
        matches!(self, ManagerError::Read { .. })
    }

    /// Check if this error came from a failed merge step.
    pub fn is_merge_error(&self) -> bool {
        matches!(self, ManagerError::Merge { .. })
    }

    /// The merge step that failed, if this is a merge error.
    pub fn merge_step(&self) -> Option<MergeStep> {
        match self {
            ManagerError::Merge { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Check if the underlying failure was a not-found condition.
    pub fn is_not_found(&self) -> bool {
        match self {
            ManagerError::Write { source, .. }
            | ManagerError::Read { source, .. }
            | ManagerError::Merge { source, .. } => source.is_not_found(),
        }
    }

    /// The collection involved, when the error is about a single collection.
    pub fn collection(&self) -> Option<&'static str> {
        match self {
            ManagerError::Write { collection, .. } | ManagerError::Read { collection, .. } => {
                Some(collection)
            }
            ManagerError::Merge { .. } => None,
        }
    }
}

// Conversion from ManagerError to the main Error type
impl From<ManagerError> for crate::Error {
    fn from(err: ManagerError) -> Self {
        crate::Error::Manager(err)
    }
}
