//! [`Command`] for submitting a verification [`Request`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::verification::{Payload, Request};
use crate::{
    domain::{broker, verification, Broker},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for submitting a verification [`Request`] of a [`Broker`].
///
/// The credentials from the [`Payload`] are written onto the [`Broker`]
/// profile as part of the same submission.
#[derive(Clone, Debug)]
pub struct SubmitVerification {
    /// ID of the [`Broker`] submitting the [`Request`].
    pub broker_id: broker::Id,

    /// Submitted credentials.
    pub payload: verification::Payload,
}

impl<Db> Command<SubmitVerification> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<verification::Request, broker::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Broker>, broker::Id>>,
            Ok = Option<Broker>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<read::verification::Pending>, broker::Id>>,
            Ok = Option<read::verification::Pending>,
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
        cmd: SubmitVerification,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitVerification { broker_id, payload } = cmd;

        let missing = payload.missing_fields();
        if !missing.is_empty() {
            return Err(tracerr::new!(E::MissingFields(missing)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Serialize concurrent submissions of the same `Broker`, so at most
        // one pending `Request` can ever exist.
        tx.execute(Lock(By::new(broker_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut broker = tx
            .execute(Select(By::<Option<Broker>, _>::new(broker_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::BrokerNotExists(broker_id))
            .map_err(tracerr::wrap!())?;

        let pending = tx
            .execute(Select(
                By::<Option<read::verification::Pending>, _>::new(broker_id),
            ))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if pending.is_some() {
            return Err(tracerr::new!(E::PendingRequestExists(broker_id)));
        }

        let request = verification::Request {
            id: verification::Id::new(),
            broker_id,
            status: verification::Status::UnderReview,
            document_urls: payload.document_urls.clone(),
            notes: None,
            submitted_at: DateTime::now().coerce(),
            decided_at: None,
        };

        broker.agency_id = payload.agency_id;
        broker.name = payload.name;
        broker.phone = payload.phone;
        broker.email = payload.email;
        broker.bio = payload.bio;
        broker.photo_url = payload.photo_url;
        broker.license_number = payload.license_number;
        broker.registration_id = payload.registration_id;
        broker.years_of_experience = payload.years_of_experience;
        broker.languages = payload.languages;
        broker.completeness = broker.completeness();
        // A verified `Broker` stays publicly visible while the new `Request`
        // awaits a decision.
        if broker.verification != verification::Status::Verified {
            broker.verification = verification::Status::UnderReview;
        }

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

/// Error of [`SubmitVerification`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Broker`] with the provided ID does not exist.
    #[display("`Broker(id: {_0})` does not exist")]
    BrokerNotExists(#[error(not(source))] broker::Id),

    /// Required [`Payload`] fields are missing.
    #[display("Missing required fields: {_0:?}")]
    MissingFields(#[error(not(source))] Vec<verification::Field>),

    /// [`Broker`] already has a pending [`Request`].
    #[display("`Broker(id: {_0})` already has a pending request")]
    #[from(ignore)]
    PendingRequestExists(#[error(not(source))] broker::Id),
}
