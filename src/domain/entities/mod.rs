//! Core domain entities.
//!
//! The service has a single entity, the [`Link`] record. Creation input is
//! carried by [`NewLink`], which already holds the generated id and timestamps
//! so that repositories only persist what they are given.

pub mod link;

pub use link::{Link, NewLink};
