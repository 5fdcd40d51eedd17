//! Domain logic - versions, repository state and outcomes, independent of git

pub mod outcome;
pub mod settings;
pub mod state;
pub mod version;

pub use outcome::UpdateOutcome;
pub use settings::UpdateSettings;
pub use state::RepoState;
pub use version::{PrereleasePolicy, Version};
