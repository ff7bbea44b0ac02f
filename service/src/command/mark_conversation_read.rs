//! [`Command`] for marking a conversation as read.

use common::{operations::Update, DateTime};
use tracerr::Traced;

use crate::{
    domain::user,
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for marking all unread [`Message`]s from a peer as read.
///
/// [`Message`]: crate::domain::Message
#[derive(Clone, Copy, Debug)]
pub struct MarkConversationRead {
    /// ID of the [`User`] who read the conversation.
    ///
    /// [`User`]: crate::domain::User
    pub reader: user::Id,

    /// ID of the [`User`] on the other side of the conversation.
    ///
    /// [`User`]: crate::domain::User
    pub peer: user::Id,
}

impl<Db> Command<MarkConversationRead> for Service<Db>
where
    Db: Database<
        Update<read::message::ConversationRead>,
        Ok = u64,
        Err = Traced<database::Error>,
    >,
{
    type Ok = u64;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: MarkConversationRead,
    ) -> Result<Self::Ok, Self::Err> {
        let MarkConversationRead { reader, peer } = cmd;

        self.database()
            .execute(Update(read::message::ConversationRead {
                reader,
                peer,
                at: DateTime::now().coerce(),
            }))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`MarkConversationRead`] [`Command`] execution.
pub type ExecutionError = database::Error;
