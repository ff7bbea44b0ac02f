//! Domain definitions.

pub mod agency;
pub mod broker;
pub mod listing;
pub mod message;
pub mod review;
pub mod url;
pub mod user;
pub mod verification;

pub use self::{
    agency::Agency, broker::Broker, listing::Listing, message::Message,
    review::Review, url::Url, user::User,
};
