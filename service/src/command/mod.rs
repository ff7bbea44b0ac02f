//! [`Command`] definition.

pub mod authorize_user_session;
pub mod change_listing_status;
pub mod create_listing;
pub mod create_review;
pub mod create_user;
pub mod create_user_session;
pub mod decide_verification;
pub mod mark_conversation_read;
pub mod record_listing_view;
pub mod register_agency;
pub mod send_message;
pub mod submit_verification;
pub mod update_broker_profile;
pub mod update_listing;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession,
    change_listing_status::ChangeListingStatus, create_listing::CreateListing,
    create_review::CreateReview, create_user::CreateUser,
    create_user_session::CreateUserSession,
    decide_verification::DecideVerification,
    mark_conversation_read::MarkConversationRead,
    record_listing_view::RecordListingView, register_agency::RegisterAgency,
    send_message::SendMessage, submit_verification::SubmitVerification,
    update_broker_profile::UpdateBrokerProfile, update_listing::UpdateListing,
};
