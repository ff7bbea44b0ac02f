//! [`Command`] for creating a new [`Listing`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime, NumericText,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::listing::{
    Amenity, Bathrooms, Bedrooms, Description, Furnishing, Kind, Location,
    PropertyKind, Title,
};
use crate::{
    domain::{broker, listing, Broker, Listing, Url},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Listing`].
#[derive(Clone, Debug)]
pub struct CreateListing {
    /// ID of the [`Broker`] owning a new [`Listing`].
    pub broker_id: broker::Id,

    /// [`Title`] of a new [`Listing`].
    pub title: listing::Title,

    /// [`Description`] of a new [`Listing`].
    pub description: Option<listing::Description>,

    /// [`Kind`] of the deal offered by a new [`Listing`].
    pub kind: listing::Kind,

    /// [`PropertyKind`] of a new [`Listing`].
    pub property_kind: listing::PropertyKind,

    /// [`Location`] of a new [`Listing`].
    pub location: listing::Location,

    /// Number of bedrooms, where `0` denotes a studio.
    pub bedrooms: Option<listing::Bedrooms>,

    /// Number of bathrooms.
    pub bathrooms: Option<listing::Bathrooms>,

    /// [`Furnishing`] of a new [`Listing`].
    pub furnishing: Option<listing::Furnishing>,

    /// Human-readable price of a new [`Listing`].
    pub price: NumericText,

    /// Human-readable area of a new [`Listing`].
    pub area: Option<NumericText>,

    /// [`Amenity`] tags of a new [`Listing`].
    pub amenities: Vec<listing::Amenity>,

    /// Photo [`Url`]s of a new [`Listing`].
    pub photo_urls: Vec<Url>,

    /// Indicator whether a new [`Listing`] is featured.
    pub featured: bool,
}

impl<Db> Command<CreateListing> for Service<Db>
where
    Db: Database<
            Select<By<Option<Broker>, broker::Id>>,
            Ok = Option<Broker>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Listing>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateListing {
            broker_id,
            title,
            description,
            kind,
            property_kind,
            location,
            bedrooms,
            bathrooms,
            furnishing,
            price,
            area,
            amenities,
            photo_urls,
            featured,
        } = cmd;

        drop(
            self.database()
                .execute(Select(By::new(broker_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or_else(|| E::BrokerNotExists(broker_id))
                .map_err(tracerr::wrap!())?,
        );

        let listing = Listing {
            id: listing::Id::new(),
            broker_id,
            title,
            description,
            kind,
            property_kind,
            location,
            bedrooms,
            bathrooms,
            furnishing,
            price,
            area,
            amenities,
            photo_urls,
            status: listing::Status::Available,
            featured,
            view_count: 0,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
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

/// Error of [`CreateListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Broker`] with the provided ID does not exist.
    #[display("`Broker(id: {_0})` does not exist")]
    BrokerNotExists(#[error(not(source))] broker::Id),
}
