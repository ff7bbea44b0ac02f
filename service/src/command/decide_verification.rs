//! [`Command`] for deciding upon a verification [`Request`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::verification::{Decision, Notes, Request};
use crate::{
    domain::{broker, user, verification, Broker, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deciding upon a pending verification [`Request`].
///
/// Only an admin [`User`] may decide.
#[derive(Clone, Debug)]
pub struct DecideVerification {
    /// ID of the [`User`] making the [`Decision`].
    pub initiator: user::Id,

    /// ID of the [`Request`] to decide upon.
    pub request_id: verification::Id,

    /// The [`Decision`] itself.
    pub decision: verification::Decision,

    /// Optional [`Notes`] explaining the [`Decision`].
    pub notes: Option<verification::Notes>,
}

impl<Db> Command<DecideVerification> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<verification::Request, verification::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<verification::Request>, verification::Id>>,
            Ok = Option<verification::Request>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Broker>, broker::Id>>,
            Ok = Option<Broker>,
            Err = Traced<database::Error>,
        > + Database<
            Insert<verification::Request>,
            Err = Traced<database::Error>,
        > + Database<Insert<Broker>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = verification::Request;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DecideVerification,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DecideVerification {
            initiator,
            request_id,
            decision,
            notes,
        } = cmd;

        let admin = self
            .database()
            .execute(Select(By::new(initiator)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::UserNotExists(initiator))
            .map_err(tracerr::wrap!())?;
        if !admin.is_admin() {
            return Err(tracerr::new!(E::NotAdmin(initiator)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Make concurrent decisions upon the same `Request` idempotent.
        tx.execute(Lock(By::new(request_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut request = tx
            .execute(Select(By::new(request_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::RequestNotExists(request_id))
            .map_err(tracerr::wrap!())?;
        if !request.status.is_pending() {
            return Err(tracerr::new!(E::RequestNotPending(request_id)));
        }

        request.status = decision.status();
        request.notes = notes;
        request.decided_at = Some(DateTime::now().coerce());

        let mut broker = tx
            .execute(Select(By::new(request.broker_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::BrokerNotExists(request.broker_id))
            .map_err(tracerr::wrap!())?;
        broker.verification = decision.status();

        tx.execute(Insert(request.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Insert(broker))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(request)
    }
}

/// Error of [`DecideVerification`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),

    /// Initiating [`User`] is not an admin.
    #[display("`User(id: {_0})` is not an admin")]
    #[from(ignore)]
    NotAdmin(#[error(not(source))] user::Id),

    /// [`Request`] with the provided ID does not exist.
    #[display("`Request(id: {_0})` does not exist")]
    RequestNotExists(#[error(not(source))] verification::Id),

    /// [`Request`] is not pending anymore.
    #[display("`Request(id: {_0})` is not pending")]
    #[from(ignore)]
    RequestNotPending(#[error(not(source))] verification::Id),

    /// [`Broker`] the [`Request`] belongs to does not exist.
    #[display("`Broker(id: {_0})` does not exist")]
    BrokerNotExists(#[error(not(source))] broker::Id),
}
