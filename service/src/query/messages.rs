//! [`Query`] collection related to [`Message`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Message, Query};

use super::DatabaseQuery;

/// Queries a page of the conversation between two [`User`]s.
///
/// [`User`]: crate::domain::User
pub type Conversation = DatabaseQuery<
    By<read::message::conversation::Page, read::message::conversation::Selector>,
>;
