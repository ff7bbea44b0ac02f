//! GraphQL [`Mutation`]s definitions.

use common::NumericText;
use juniper::graphql_object;
use service::{command, domain, Command as _};

use crate::{api, define_error, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `User` with the provided credentials and contact info.
    ///
    /// The `role` defaults to `CUSTOMER`. The `ADMIN` role cannot be
    /// self-assigned.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LOGIN_OCCUPIED` - provided `UserLogin` is occupied by another `User`;
    /// - `NO_CONTACT_INFO` - either `UserEmail` or `UserPhone` must be
    ///                       provided;
    /// - `NOT_ADMIN` - the `ADMIN` role was requested.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createUser",
            email = ?email,
            login = %login,
            name = %name,
            otel.name = Self::SPAN_NAME,
            phone = ?phone,
            role = ?role,
        ),
    )]
    pub async fn create_user(
        name: api::user::Name,
        login: api::user::Login,
        password: api::user::Password,
        email: Option<api::user::Email>,
        phone: Option<api::user::Phone>,
        role: Option<api::user::Role>,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let role = role.unwrap_or(api::user::Role::Customer);
        if role == api::user::Role::Admin {
            return Err(api::PrivilegeError::Admin.into()).map_err(ctx.error());
        }

        let user = ctx
            .service()
            .execute(command::CreateUser {
                name: name.into(),
                login: login.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
                email: email.map(Into::into),
                phone: phone.map(Into::into),
                role: role.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByUserId(user.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            user_id: output.user.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Creates a new `UserSession` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials does not match any `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createUserSession",
            login = %login,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user_session(
        login: api::user::Login,
        password: api::user::Password,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByCredentials {
                login: login.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            user_id: output.user.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Registers a new `Agency` with the provided name.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AGENCY_NAME_OCCUPIED` - provided `AgencyName` is occupied by
    ///                            another `Agency`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "registerAgency",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn register_agency(
        name: api::agency::Name,
        description: Option<api::agency::Description>,
        website: Option<api::Url>,
        ctx: &Context,
    ) -> Result<api::Agency, Error> {
        drop(ctx.current_session().await?);

        ctx.service()
            .execute(command::RegisterAgency {
                name: name.into(),
                description: description.map(Into::into),
                website: website.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `Broker` profile of the currently authenticated `User`,
    /// creating it on the first call.
    ///
    /// All the profile fields are replaced with the provided values, an
    /// omitted one is unset.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_BROKER` - the current `User` does not have the `BROKER` role;
    /// - `AGENCY_NOT_EXISTS` - the `Agency` with the specified ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            agency_id = ?agency_id,
            gql.name = "updateBrokerProfile",
            name = ?name.as_ref().map(ToString::to_string),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "profile surface")]
    pub async fn update_broker_profile(
        agency_id: Option<api::agency::Id>,
        name: Option<api::broker::Name>,
        phone: Option<api::user::Phone>,
        email: Option<api::user::Email>,
        bio: Option<api::broker::Bio>,
        photo_url: Option<api::Url>,
        license_number: Option<api::broker::LicenseNumber>,
        registration_id: Option<api::broker::RegistrationId>,
        years_of_experience: Option<i32>,
        languages: Option<Vec<api::broker::Language>>,
        ctx: &Context,
    ) -> Result<api::Broker, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateBrokerProfile {
                user_id: my_id.into(),
                agency_id: agency_id.map(Into::into),
                name: name.map(Into::into),
                phone: phone.map(Into::into),
                email: email.map(Into::into),
                bio: bio.map(Into::into),
                photo_url: photo_url.map(Into::into),
                license_number: license_number.map(Into::into),
                registration_id: registration_id.map(Into::into),
                years_of_experience: years_of_experience
                    .and_then(|y| u16::try_from(y).ok()),
                languages: languages
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Submits a verification request for the `Broker` profile of the
    /// currently authenticated `User`.
    ///
    /// The submitted credentials are written onto the `Broker` profile as
    /// part of the same submission.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_BROKER` - the current `User` has no `Broker` profile;
    /// - `MISSING_FIELDS` - required credentials are missing;
    /// - `PENDING_REQUEST_EXISTS` - a previous request still awaits a
    ///                              decision.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "submitVerification",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "submission surface")]
    pub async fn submit_verification(
        name: Option<api::broker::Name>,
        phone: Option<api::user::Phone>,
        email: Option<api::user::Email>,
        bio: Option<api::broker::Bio>,
        photo_url: Option<api::Url>,
        license_number: Option<api::broker::LicenseNumber>,
        registration_id: Option<api::broker::RegistrationId>,
        years_of_experience: Option<i32>,
        languages: Option<Vec<api::broker::Language>>,
        agency_id: Option<api::agency::Id>,
        document_urls: Vec<api::Url>,
        ctx: &Context,
    ) -> Result<api::verification::Request, Error> {
        let broker = api::broker::require_own(ctx).await?;

        ctx.service()
            .execute(command::SubmitVerification {
                broker_id: broker.id,
                payload: domain::verification::Payload {
                    name: name.map(Into::into),
                    phone: phone.map(Into::into),
                    email: email.map(Into::into),
                    bio: bio.map(Into::into),
                    photo_url: photo_url.map(Into::into),
                    license_number: license_number.map(Into::into),
                    registration_id: registration_id.map(Into::into),
                    years_of_experience: years_of_experience
                        .and_then(|y| u16::try_from(y).ok()),
                    languages: languages
                        .unwrap_or_default()
                        .into_iter()
                        .map(Into::into)
                        .collect(),
                    agency_id: agency_id.map(Into::into),
                    document_urls: document_urls
                        .into_iter()
                        .map(Into::into)
                        .collect(),
                },
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Decides the verification request with the specified ID.
    ///
    /// Administrators only.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the current `User` is not an administrator;
    /// - `REQUEST_NOT_EXISTS` - the request with the specified ID does not
    ///                          exist;
    /// - `REQUEST_NOT_PENDING` - the request is already decided.
    #[tracing::instrument(
        skip_all,
        fields(
            decision = ?decision,
            gql.name = "decideVerification",
            otel.name = Self::SPAN_NAME,
            request_id = %request_id,
        ),
    )]
    pub async fn decide_verification(
        request_id: api::verification::Id,
        decision: api::verification::Decision,
        notes: Option<api::verification::Notes>,
        ctx: &Context,
    ) -> Result<api::verification::Request, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DecideVerification {
                initiator: my_id.into(),
                request_id: request_id.into(),
                decision: decision.into(),
                notes: notes.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Listing` owned by the `Broker` profile of the
    /// currently authenticated `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_BROKER` - the current `User` has no `Broker` profile.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createListing",
            kind = ?kind,
            otel.name = Self::SPAN_NAME,
            title = %title,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "listing surface")]
    pub async fn create_listing(
        title: api::listing::Title,
        description: Option<api::listing::Description>,
        kind: api::listing::Kind,
        property_kind: api::listing::PropertyKind,
        location: api::listing::Location,
        bedrooms: Option<i32>,
        bathrooms: Option<i32>,
        furnishing: Option<api::listing::Furnishing>,
        price: NumericText,
        area: Option<NumericText>,
        amenities: Option<Vec<api::listing::Amenity>>,
        photo_urls: Option<Vec<api::Url>>,
        featured: Option<bool>,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let broker = api::broker::require_own(ctx).await?;

        ctx.service()
            .execute(command::CreateListing {
                broker_id: broker.id,
                title: title.into(),
                description: description.map(Into::into),
                kind: kind.into(),
                property_kind: property_kind.into(),
                location: location.into(),
                bedrooms: bedrooms.and_then(|b| u16::try_from(b).ok()),
                bathrooms: bathrooms.and_then(|b| u16::try_from(b).ok()),
                furnishing: furnishing.map(Into::into),
                price,
                area,
                amenities: amenities
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                photo_urls: photo_urls
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                featured: featured.unwrap_or_default(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `Listing` with the specified ID.
    ///
    /// Only the provided fields are changed, an omitted one keeps its
    /// current value.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_BROKER` - the current `User` has no `Broker` profile;
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified ID does not
    ///                          exist;
    /// - `NOT_LISTING_OWNER` - the `Listing` belongs to another `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateListing",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "listing surface")]
    pub async fn update_listing(
        id: api::listing::Id,
        title: Option<api::listing::Title>,
        description: Option<api::listing::Description>,
        kind: Option<api::listing::Kind>,
        property_kind: Option<api::listing::PropertyKind>,
        location: Option<api::listing::Location>,
        bedrooms: Option<i32>,
        bathrooms: Option<i32>,
        furnishing: Option<api::listing::Furnishing>,
        price: Option<NumericText>,
        area: Option<NumericText>,
        amenities: Option<Vec<api::listing::Amenity>>,
        photo_urls: Option<Vec<api::Url>>,
        featured: Option<bool>,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let broker = api::broker::require_own(ctx).await?;

        ctx.service()
            .execute(command::UpdateListing {
                listing_id: id.into(),
                initiator: broker.id,
                title: title.map(Into::into),
                description: description.map(Into::into),
                kind: kind.map(Into::into),
                property_kind: property_kind.map(Into::into),
                location: location.map(Into::into),
                bedrooms: bedrooms.and_then(|b| u16::try_from(b).ok()),
                bathrooms: bathrooms.and_then(|b| u16::try_from(b).ok()),
                furnishing: furnishing.map(Into::into),
                price,
                area,
                amenities: amenities
                    .map(|a| a.into_iter().map(Into::into).collect()),
                photo_urls: photo_urls
                    .map(|u| u.into_iter().map(Into::into).collect()),
                featured,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Changes the status of the `Listing` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_BROKER` - the current `User` has no `Broker` profile;
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified ID does not
    ///                          exist;
    /// - `NOT_LISTING_OWNER` - the `Listing` belongs to another `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "changeListingStatus",
            id = %id,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn change_listing_status(
        id: api::listing::Id,
        status: api::listing::Status,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let broker = api::broker::require_own(ctx).await?;

        ctx.service()
            .execute(command::ChangeListingStatus {
                listing_id: id.into(),
                initiator: broker.id,
                status: status.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Records a view of the `Listing` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "recordListingView",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn record_listing_view(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        ctx.service()
            .execute(command::RecordListingView(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Leaves a `Review` for the specified `Broker`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_RATING` - the rating is out of the 1..=5 bounds;
    /// - `BROKER_NOT_EXISTS` - the `Broker` with the specified ID does not
    ///                         exist;
    /// - `SELF_REVIEW` - the `Broker` belongs to the current `User`;
    /// - `ALREADY_REVIEWED` - the current `User` has already reviewed this
    ///                        `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            broker_id = %broker_id,
            gql.name = "createReview",
            otel.name = Self::SPAN_NAME,
            rating = %rating,
        ),
    )]
    pub async fn create_review(
        broker_id: api::broker::Id,
        rating: i32,
        comment: Option<api::review::Comment>,
        ctx: &Context,
    ) -> Result<api::Review, Error> {
        let my_id = ctx.current_session().await?.user_id;

        let rating = u8::try_from(rating)
            .ok()
            .and_then(domain::review::Rating::new)
            .ok_or_else(|| RatingError::Invalid.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::CreateReview {
                author: my_id.into(),
                broker_id: broker_id.into(),
                rating,
                comment: comment.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Sends a `Message` to the specified `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `RECIPIENT_NOT_EXISTS` - the recipient `User` does not exist;
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified ID does not
    ///                          exist;
    /// - `SELF_MESSAGE` - the recipient is the current `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "sendMessage",
            listing_id = ?listing_id,
            otel.name = Self::SPAN_NAME,
            recipient_id = %recipient_id,
        ),
    )]
    pub async fn send_message(
        recipient_id: api::user::Id,
        listing_id: Option<api::listing::Id>,
        text: api::message::Text,
        ctx: &Context,
    ) -> Result<api::Message, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::SendMessage {
                sender: my_id.into(),
                recipient: recipient_id.into(),
                listing_id: listing_id.map(Into::into),
                text: text.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Marks all unread `Message`s from the specified peer as read,
    /// returning the number of affected `Message`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "markConversationRead",
            otel.name = Self::SPAN_NAME,
            peer_id = %peer_id,
        ),
    )]
    pub async fn mark_conversation_read(
        peer_id: api::user::Id,
        ctx: &Context,
    ) -> Result<i32, Error> {
        let my_id = ctx.current_session().await?.user_id;

        let affected = ctx
            .service()
            .execute(command::MarkConversationRead {
                reader: my_id.into(),
                peer: peer_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        i32::try_from(affected).map_err(AsError::into_error)
    }
}

define_error! {
    enum RatingError {
        #[code = "INVALID_RATING"]
        #[status = BAD_REQUEST]
        #[message = "`Review` rating must be between 1 and 5"]
        Invalid,
    }
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LOGIN_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`UserLogin` is occupied by another \
                             `User`"]
                LoginOccupied,

                #[code = "NO_CONTACT_INFO"]
                #[status = BAD_REQUEST]
                #[message = "Either `UserEmail` or `UserPhone` must be \
                             provided"]
                NoContactInfo,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::LoginOccupied(_) => Some(Error::LoginOccupied.into()),
            Self::NoContactInfo => Some(Error::NoContactInfo.into()),
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[status = FORBIDDEN]
                #[message = "Provided credentials does not match any `User`"]
                WrongCredentials,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::UserNotExists(_) | Self::WrongCredentials => {
                Some(Error::WrongCredentials.into())
            }
        }
    }
}

impl AsError for command::register_agency::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "AGENCY_NAME_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`AgencyName` is occupied by another `Agency`"]
                NameOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NameOccupied(_) => Some(Error::NameOccupied.into()),
        }
    }
}

impl AsError for command::update_broker_profile::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "AGENCY_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Agency` with the specified ID does not exist"]
                AgencyNotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => None,
            Self::UserNotBroker(_) => Some(api::PrivilegeError::Broker.into()),
            Self::AgencyNotExists(_) => Some(Error::AgencyNotExists.into()),
        }
    }
}

impl AsError for command::submit_verification::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "MISSING_FIELDS"]
                #[status = UNPROCESSABLE_ENTITY]
                #[message = "Required verification credentials are missing"]
                MissingFields,

                #[code = "PENDING_REQUEST_EXISTS"]
                #[status = CONFLICT]
                #[message = "A previous verification request still awaits a \
                             decision"]
                PendingRequestExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::BrokerNotExists(_) => None,
            Self::MissingFields(_) => Some(Error::MissingFields.into()),
            Self::PendingRequestExists(_) => {
                Some(Error::PendingRequestExists.into())
            }
        }
    }
}

impl AsError for command::decide_verification::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "REQUEST_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Verification request with the specified ID does \
                             not exist"]
                RequestNotExists,

                #[code = "REQUEST_NOT_PENDING"]
                #[status = CONFLICT]
                #[message = "Verification request is already decided"]
                RequestNotPending,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) | Self::BrokerNotExists(_) => None,
            Self::NotAdmin(_) => Some(api::PrivilegeError::Admin.into()),
            Self::RequestNotExists(_) => Some(Error::RequestNotExists.into()),
            Self::RequestNotPending(_) => {
                Some(Error::RequestNotPending.into())
            }
        }
    }
}

impl AsError for command::create_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::BrokerNotExists(_) => None,
        }
    }
}

impl AsError for command::update_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ListingNotExists(_) => {
                Some(ListingOwnershipError::NotExists.into())
            }
            Self::NotOwner(_) => Some(ListingOwnershipError::NotOwner.into()),
        }
    }
}

impl AsError for command::change_listing_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ListingNotExists(_) => {
                Some(ListingOwnershipError::NotExists.into())
            }
            Self::NotOwner(_) => Some(ListingOwnershipError::NotOwner.into()),
        }
    }
}

impl AsError for command::record_listing_view::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ListingNotExists(_) => {
                Some(ListingOwnershipError::NotExists.into())
            }
        }
    }
}

impl AsError for command::create_review::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "BROKER_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Broker` with the specified ID does not exist"]
                BrokerNotExists,

                #[code = "SELF_REVIEW"]
                #[status = BAD_REQUEST]
                #[message = "`Broker`s cannot review their own profile"]
                SelfReview,

                #[code = "ALREADY_REVIEWED"]
                #[status = CONFLICT]
                #[message = "`Broker` is already reviewed by the current \
                             `User`"]
                AlreadyReviewed,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => None,
            Self::BrokerNotExists(_) => Some(Error::BrokerNotExists.into()),
            Self::SelfReview(_) => Some(Error::SelfReview.into()),
            Self::AlreadyReviewed(_) => Some(Error::AlreadyReviewed.into()),
        }
    }
}

impl AsError for command::send_message::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "RECIPIENT_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Recipient `User` does not exist"]
                RecipientNotExists,

                #[code = "SELF_MESSAGE"]
                #[status = BAD_REQUEST]
                #[message = "`User`s cannot message themselves"]
                SelfMessage,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::RecipientNotExists(_) => {
                Some(Error::RecipientNotExists.into())
            }
            Self::ListingNotExists(_) => {
                Some(ListingOwnershipError::NotExists.into())
            }
            Self::SelfMessage(_) => Some(Error::SelfMessage.into()),
        }
    }
}

define_error! {
    enum ListingOwnershipError {
        #[code = "LISTING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Listing` with the specified ID does not exist"]
        NotExists,

        #[code = "NOT_LISTING_OWNER"]
        #[status = FORBIDDEN]
        #[message = "`Listing` belongs to another `Broker`"]
        NotOwner,
    }
}
