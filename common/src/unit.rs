//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing an entity submission.
#[derive(Clone, Copy, Debug)]
pub struct Submission;

/// Marker type describing a decision upon an entity.
#[derive(Clone, Copy, Debug)]
pub struct Decision;

/// Marker type describing an entity expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// Marker type describing an entity being read.
#[derive(Clone, Copy, Debug)]
pub struct Reading;
