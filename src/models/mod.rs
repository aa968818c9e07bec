//! Data models for the Gloria choir site.
//!
//! Wire names are camelCase to match what the front end already stores.

mod datastore;
mod event;
mod intro;
mod media;
mod member;

pub use datastore::*;
pub use event::*;
pub use intro::*;
pub use media::*;
pub use member::*;
