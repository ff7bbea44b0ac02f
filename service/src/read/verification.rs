//! Verification-related read definitions.

use derive_more::Deref;

use crate::domain::verification;
#[cfg(doc)]
use crate::domain::{verification::Request, Broker};

/// Pending verification [`Request`] of a [`Broker`].
///
/// At most one exists per [`Broker`] at any time.
#[derive(Clone, Debug, Deref)]
pub struct Pending(pub verification::Request);

/// Verification state of a [`Broker`], as returned to its owner.
#[derive(Clone, Debug)]
pub struct Status {
    /// Current [`verification::Status`] of the [`Broker`].
    pub current: verification::Status,

    /// [`verification::Notes`] of the latest decided [`Request`].
    pub notes: Option<verification::Notes>,

    /// All verification [`Request`]s of the [`Broker`], newest first.
    pub history: Vec<verification::Request>,
}
