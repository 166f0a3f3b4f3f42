//! Pure data structures. [`Order`] implements the [`ActorEntity`](crate::framework::ActorEntity) trait.

pub mod order;
pub mod status;
pub mod steps;

pub use order::*;
pub use status::*;
pub use steps::*;
