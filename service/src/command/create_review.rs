//! [`Command`] for creating a new [`Review`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::review::{Comment, Rating};
use crate::{
    domain::{broker, review, user, Broker, Review, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Review`] on a [`Broker`].
#[derive(Clone, Debug)]
pub struct CreateReview {
    /// ID of the [`User`] authoring the [`Review`].
    pub author: user::Id,

    /// ID of the reviewed [`Broker`].
    pub broker_id: broker::Id,

    /// [`Rating`] of the [`Review`].
    pub rating: review::Rating,

    /// [`Comment`] of the [`Review`].
    pub comment: Option<review::Comment>,
}

impl<Db> Command<CreateReview> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Broker>, broker::Id>>,
            Ok = Option<Broker>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Review, (broker::Id, user::Id)>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Review>, (broker::Id, user::Id)>>,
            Ok = Option<Review>,
            Err = Traced<database::Error>,
        > + Database<Insert<Review>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Review;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateReview,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateReview {
            author,
            broker_id,
            rating,
            comment,
        } = cmd;

        drop(
            self.database()
                .execute(Select(By::new(author)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or_else(|| E::UserNotExists(author))
                .map_err(tracerr::wrap!())?,
        );
        let broker = self
            .database()
            .execute(Select(By::new(broker_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::BrokerNotExists(broker_id))
            .map_err(tracerr::wrap!())?;
        if broker.user_id == author {
            return Err(tracerr::new!(E::SelfReview(author)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // One `Review` per author per `Broker`.
        tx.execute(Lock(By::new((broker_id, author))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let existing: Option<Review> = tx
            .execute(Select(By::new((broker_id, author))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::AlreadyReviewed(broker_id)));
        }

        let review = Review {
            id: review::Id::new(),
            broker_id,
            author_id: author,
            rating,
            comment,
            created_at: DateTime::now().coerce(),
        };

        tx.execute(Insert(review.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(review)
    }
}

/// Error of [`CreateReview`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),

    /// [`Broker`] with the provided ID does not exist.
    #[display("`Broker(id: {_0})` does not exist")]
    BrokerNotExists(#[error(not(source))] broker::Id),

    /// [`Broker`]s cannot review themselves.
    #[display("`User(id: {_0})` cannot review their own profile")]
    #[from(ignore)]
    SelfReview(#[error(not(source))] user::Id),

    /// [`User`] has already reviewed this [`Broker`].
    #[display("`Broker(id: {_0})` is already reviewed by this user")]
    #[from(ignore)]
    AlreadyReviewed(#[error(not(source))] broker::Id),
}
