//! Read models of the [`Service`].
//!
//! [`Service`]: crate::Service

pub mod broker;
pub mod listing;
pub mod message;
pub mod review;
pub mod verification;
