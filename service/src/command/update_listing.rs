//! [`Command`] for updating a [`Listing`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    NumericText,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::listing::{
    Amenity, Bathrooms, Bedrooms, Description, Furnishing, Kind, Location,
    PropertyKind, Title,
};
use crate::{
    domain::{broker, listing, Listing, Url},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Listing`].
///
/// An absent field is left unchanged. Changing the `price` or `area` text
/// re-derives the numeric values backing range filters and sorting.
#[derive(Clone, Debug)]
pub struct UpdateListing {
    /// ID of the [`Listing`] to update.
    pub listing_id: listing::Id,

    /// ID of the [`Broker`] initiating the update.
    ///
    /// [`Broker`]: crate::domain::Broker
    pub initiator: broker::Id,

    /// New [`Title`] of the [`Listing`].
    pub title: Option<listing::Title>,

    /// New [`Description`] of the [`Listing`].
    pub description: Option<listing::Description>,

    /// New [`Kind`] of the deal offered by the [`Listing`].
    pub kind: Option<listing::Kind>,

    /// New [`PropertyKind`] of the [`Listing`].
    pub property_kind: Option<listing::PropertyKind>,

    /// New [`Location`] of the [`Listing`].
    pub location: Option<listing::Location>,

    /// New number of bedrooms.
    pub bedrooms: Option<listing::Bedrooms>,

    /// New number of bathrooms.
    pub bathrooms: Option<listing::Bathrooms>,

    /// New [`Furnishing`] of the [`Listing`].
    pub furnishing: Option<listing::Furnishing>,

    /// New human-readable price of the [`Listing`].
    pub price: Option<NumericText>,

    /// New human-readable area of the [`Listing`].
    pub area: Option<NumericText>,

    /// New [`Amenity`] tags of the [`Listing`].
    pub amenities: Option<Vec<listing::Amenity>>,

    /// New photo [`Url`]s of the [`Listing`].
    pub photo_urls: Option<Vec<Url>>,

    /// New featured indicator of the [`Listing`].
    pub featured: Option<bool>,
}

impl<Db> Command<UpdateListing> for Service<Db>
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
        cmd: UpdateListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateListing {
            listing_id,
            initiator,
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

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid lost updates under concurrent edits.
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

        if let Some(title) = title {
            listing.title = title;
        }
        if let Some(description) = description {
            listing.description = Some(description);
        }
        if let Some(kind) = kind {
            listing.kind = kind;
        }
        if let Some(property_kind) = property_kind {
            listing.property_kind = property_kind;
        }
        if let Some(location) = location {
            listing.location = location;
        }
        if let Some(bedrooms) = bedrooms {
            listing.bedrooms = Some(bedrooms);
        }
        if let Some(bathrooms) = bathrooms {
            listing.bathrooms = Some(bathrooms);
        }
        if let Some(furnishing) = furnishing {
            listing.furnishing = Some(furnishing);
        }
        if let Some(price) = price {
            listing.price = price;
        }
        if let Some(area) = area {
            listing.area = Some(area);
        }
        if let Some(amenities) = amenities {
            listing.amenities = amenities;
        }
        if let Some(photo_urls) = photo_urls {
            listing.photo_urls = photo_urls;
        }
        if let Some(featured) = featured {
            listing.featured = featured;
        }

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

/// Error of [`UpdateListing`] [`Command`] execution.
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
