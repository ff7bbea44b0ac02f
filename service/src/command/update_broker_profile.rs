//! [`Command`] for updating a [`Broker`] profile.

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::broker::{
    Bio, Language, LicenseNumber, Name, RegistrationId, YearsOfExperience,
};
use crate::{
    domain::{agency, broker, user, verification, Agency, Broker, Url, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating the [`Broker`] profile of a [`User`].
///
/// Creates the profile if the [`User`] doesn't have one yet. Every field
/// is written as provided, so an absent one clears the profile field.
#[derive(Clone, Debug)]
pub struct UpdateBrokerProfile {
    /// ID of the [`User`] owning the profile.
    pub user_id: user::Id,

    /// ID of the [`Agency`] the [`Broker`] is affiliated with.
    pub agency_id: Option<agency::Id>,

    /// Public [`Name`] of the [`Broker`].
    pub name: Option<broker::Name>,

    /// Contact [`user::Phone`] of the [`Broker`].
    pub phone: Option<user::Phone>,

    /// Contact [`user::Email`] of the [`Broker`].
    pub email: Option<user::Email>,

    /// [`Bio`] of the [`Broker`].
    pub bio: Option<broker::Bio>,

    /// Photo [`Url`] of the [`Broker`].
    pub photo_url: Option<Url>,

    /// [`LicenseNumber`] of the [`Broker`].
    pub license_number: Option<broker::LicenseNumber>,

    /// [`RegistrationId`] of the [`Broker`].
    pub registration_id: Option<broker::RegistrationId>,

    /// [`YearsOfExperience`] of the [`Broker`].
    pub years_of_experience: Option<broker::YearsOfExperience>,

    /// [`Language`]s the [`Broker`] speaks.
    pub languages: Vec<broker::Language>,
}

impl<Db> Command<UpdateBrokerProfile> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Agency>, agency::Id>>,
            Ok = Option<Agency>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Broker, user::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Broker>, user::Id>>,
            Ok = Option<Broker>,
            Err = Traced<database::Error>,
        > + Database<Insert<Broker>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Broker;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateBrokerProfile,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateBrokerProfile {
            user_id,
            agency_id,
            name,
            phone,
            email,
            bio,
            photo_url,
            license_number,
            registration_id,
            years_of_experience,
            languages,
        } = cmd;

        let user = self
            .database()
            .execute(Select(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;
        if user.role != user::Role::Broker {
            return Err(tracerr::new!(E::UserNotBroker(user_id)));
        }

        if let Some(agency_id) = agency_id {
            drop(
                self.database()
                    .execute(Select(By::new(agency_id)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or_else(|| E::AgencyNotExists(agency_id))
                    .map_err(tracerr::wrap!())?,
            );
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of two profiles for the same `User`.
        tx.execute(Lock(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut broker = tx
            .execute(Select(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .unwrap_or_else(|| Broker {
                id: broker::Id::new(),
                user_id,
                agency_id: None,
                name: None,
                phone: None,
                email: None,
                bio: None,
                photo_url: None,
                license_number: None,
                registration_id: None,
                years_of_experience: None,
                languages: Vec::new(),
                verification: verification::Status::Unsubmitted,
                completeness: common::Percent::from_ratio(0, 1),
                created_at: DateTime::now().coerce(),
            });

        broker.agency_id = agency_id;
        broker.name = name;
        broker.phone = phone;
        broker.email = email;
        broker.bio = bio;
        broker.photo_url = photo_url;
        broker.license_number = license_number;
        broker.registration_id = registration_id;
        broker.years_of_experience = years_of_experience;
        broker.languages = languages;
        broker.completeness = broker.completeness();

        tx.execute(Insert(broker.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(broker)
    }
}

/// Error of [`UpdateBrokerProfile`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),

    /// [`User`] does not have the [`user::Role::Broker`] role.
    #[display("`User(id: {_0})` is not a broker")]
    #[from(ignore)]
    UserNotBroker(#[error(not(source))] user::Id),

    /// [`Agency`] with the provided ID does not exist.
    #[display("`Agency(id: {_0})` does not exist")]
    AgencyNotExists(#[error(not(source))] agency::Id),
}
