//! [`Command`] for sending a [`Message`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::message::Text;
use crate::{
    domain::{listing, message, user, Listing, Message, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for sending a [`Message`] to another [`User`].
#[derive(Clone, Debug)]
pub struct SendMessage {
    /// ID of the [`User`] sending the [`Message`].
    pub sender: user::Id,

    /// ID of the [`User`] to deliver the [`Message`] to.
    pub recipient: user::Id,

    /// ID of the [`Listing`] the [`Message`] is about, if any.
    pub listing_id: Option<listing::Id>,

    /// [`Text`] of the [`Message`].
    pub text: message::Text,
}

impl<Db> Command<SendMessage> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Message>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Message;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SendMessage) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SendMessage {
            sender,
            recipient,
            listing_id,
            text,
        } = cmd;

        if sender == recipient {
            return Err(tracerr::new!(E::SelfMessage(sender)));
        }

        drop(
            self.database()
                .execute(Select(By::new(recipient)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or_else(|| E::RecipientNotExists(recipient))
                .map_err(tracerr::wrap!())?,
        );
        if let Some(listing_id) = listing_id {
            drop(
                self.database()
                    .execute(Select(By::new(listing_id)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or_else(|| E::ListingNotExists(listing_id))
                    .map_err(tracerr::wrap!())?,
            );
        }

        let message = Message {
            id: message::Id::new(),
            sender_id: sender,
            recipient_id: recipient,
            listing_id,
            text,
            read_at: None,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(message.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(message)
    }
}

/// Error of [`SendMessage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Recipient [`User`] does not exist.
    #[display("`User(id: {_0})` does not exist")]
    RecipientNotExists(#[error(not(source))] user::Id),

    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// [`User`]s cannot message themselves.
    #[display("`User(id: {_0})` cannot message themselves")]
    #[from(ignore)]
    SelfMessage(#[error(not(source))] user::Id),
}
