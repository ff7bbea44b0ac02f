//! [`Command`] for recording a [`Listing`] view.

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Listing;
use crate::{
    domain::listing,
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for incrementing the view counter of a [`Listing`].
///
/// A single atomic increment, so concurrent views never lose counts.
#[derive(Clone, Copy, Debug, From)]
pub struct RecordListingView(pub listing::Id);

impl<Db> Command<RecordListingView> for Service<Db>
where
    Db: Database<
        Update<read::listing::View>,
        Ok = bool,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RecordListingView,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RecordListingView(listing_id) = cmd;

        let updated = self
            .database()
            .execute(Update(read::listing::View(listing_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !updated {
            return Err(tracerr::new!(E::ListingNotExists(listing_id)));
        }

        Ok(())
    }
}

/// Error of [`RecordListingView`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    ListingNotExists(#[error(not(source))] listing::Id),
}
