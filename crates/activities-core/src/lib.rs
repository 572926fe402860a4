pub mod activity;
pub mod directory;
pub mod error;
pub mod seed;

pub use activity::Activity;
pub use directory::{Confirmation, Directory, Listing};
pub use error::{ActivityError, Result};
pub use seed::SeedActivity;
