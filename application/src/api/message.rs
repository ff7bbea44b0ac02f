//! [`Message`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    Context,
};

/// In-app `Message` sent between two `User`s.
#[derive(Clone, Debug, From)]
pub struct Message(domain::Message);

/// In-app `Message` sent between two `User`s.
#[graphql_object(context = Context)]
impl Message {
    /// Unique identifier of this `Message`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `User` who sent this `Message`.
    #[must_use]
    pub fn sender(&self) -> api::User {
        #[expect(
            unsafe_code,
            reason = "`Message` loaded from repository guarantees `User` \
                      existence"
        )]
        unsafe {
            api::User::new_unchecked(self.0.sender_id)
        }
    }

    /// `User` this `Message` is addressed to.
    #[must_use]
    pub fn recipient(&self) -> api::User {
        #[expect(
            unsafe_code,
            reason = "`Message` loaded from repository guarantees `User` \
                      existence"
        )]
        unsafe {
            api::User::new_unchecked(self.0.recipient_id)
        }
    }

    /// `Listing` this `Message` is about, if any.
    #[must_use]
    pub fn listing(&self) -> Option<api::Listing> {
        self.0.listing_id.map(|id| {
            #[expect(
                unsafe_code,
                reason = "`Message` loaded from repository guarantees \
                          `Listing` existence"
            )]
            unsafe {
                api::Listing::new_unchecked(id)
            }
        })
    }

    /// Text of this `Message`.
    #[must_use]
    pub fn text(&self) -> Text {
        self.0.text.clone().into()
    }

    /// `DateTime` when this `Message` was read by the recipient.
    #[must_use]
    pub fn read_at(&self) -> Option<DateTime> {
        self.0.read_at.map(|at| at.coerce())
    }

    /// `DateTime` when this `Message` was sent.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Message`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::message::Id)]
#[into(domain::message::Id)]
#[graphql(name = "MessageId", transparent)]
pub struct Id(Uuid);

/// Text of a `Message`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "MessageText",
    with = scalar::Via::<domain::message::Text>,
)]
pub struct Text(domain::message::Text);

pub mod conversation {
    //! Definitions related to conversations between `User`s.

    use derive_more::From;
    use juniper::graphql_object;
    use service::read;

    use crate::{AsError, Context, Error};

    use super::Message;

    /// Page of a conversation between two `User`s.
    #[derive(Clone, Debug, From)]
    pub struct Page(read::message::conversation::Page);

    /// Page of a conversation between two `User`s.
    #[graphql_object(name = "ConversationPage", context = Context)]
    impl Page {
        /// `Message`s of this page, newest first.
        #[must_use]
        pub fn items(&self) -> Vec<Message> {
            self.0.items.iter().cloned().map(Into::into).collect()
        }

        /// Total number of `Message`s in the conversation.
        pub fn total(&self) -> Result<i32, Error> {
            i32::try_from(self.0.total).map_err(AsError::into_error)
        }

        /// Indicator whether more `Message`s exist beyond this page.
        #[must_use]
        pub fn has_more(&self) -> bool {
            self.0.has_more
        }
    }
}
