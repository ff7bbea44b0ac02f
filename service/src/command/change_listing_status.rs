//! [`Command`] for changing a [`Listing`] status.

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::listing::Status;
use crate::{
    domain::{broker, listing, Listing},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for changing the [`Status`] of a [`Listing`].
///
/// Moving a [`Listing`] out of [`Status::Available`] removes it from
/// search results without deleting it.
#[derive(Clone, Copy, Debug)]
pub struct ChangeListingStatus {
    /// ID of the [`Listing`] to change.
    pub listing_id: listing::Id,

    /// ID of the [`Broker`] initiating the change.
    ///
    /// [`Broker`]: crate::domain::Broker
    pub initiator: broker::Id,

    /// New [`Status`] of the [`Listing`].
    pub status: listing::Status,
}

impl<Db> Command<ChangeListingStatus> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Listing, listing::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<database::Error>,
        > + Database<Insert<Listing>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ChangeListingStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ChangeListingStatus {
            listing_id,
            initiator,
            status,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::new(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut listing = tx
            .execute(Select(By::new(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::ListingNotExists(listing_id))
            .map_err(tracerr::wrap!())?;
        if listing.broker_id != initiator {
            return Err(tracerr::new!(E::NotOwner(initiator)));
        }

        listing.status = status;

        tx.execute(Insert(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(listing)
    }
}

/// Error of [`ChangeListingStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// Initiating [`Broker`] does not own the [`Listing`].
    ///
    /// [`Broker`]: crate::domain::Broker
    #[display("`Broker(id: {_0})` does not own the listing")]
    NotOwner(#[error(not(source))] broker::Id),
}
