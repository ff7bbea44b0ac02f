//! [`Message`]-related read definitions.

use crate::domain::{message, user};
#[cfg(doc)]
use crate::domain::{Message, User};

/// Operation payload marking a conversation as read.
///
/// Affects all unread [`Message`]s sent by `peer` to `reader`.
#[derive(Clone, Copy, Debug)]
pub struct ConversationRead {
    /// ID of the [`User`] who read the conversation.
    pub reader: user::Id,

    /// ID of the [`User`] on the other side of the conversation.
    pub peer: user::Id,

    /// [`DateTime`] when the conversation was read.
    ///
    /// [`DateTime`]: common::DateTime
    pub at: message::ReadingDateTime,
}

pub mod conversation {
    //! Conversation definitions.
    //!
    //! A conversation is the [`Message`]s exchanged between two [`User`]s,
    //! fetched by polling.
    //!
    //! [`Message`]: crate::domain::Message
    //! [`User`]: crate::domain::User

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::user;
    #[cfg(doc)]
    use crate::domain::Message;

    define_pagination!(Node, Filter);

    /// Node in a conversation [`Page`].
    pub type Node = crate::domain::Message;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug)]
    pub struct Filter {
        /// IDs of the two [`User`]s the conversation is between.
        ///
        /// [`User`]: crate::domain::User
        pub between: (user::Id, user::Id),
    }

    /// Total count of [`Message`]s in a conversation.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i64);
}
