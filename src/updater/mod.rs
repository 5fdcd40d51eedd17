//! Update workflow: work out where the checkout stands, then move it

pub mod executor;
pub mod resolver;

pub use executor::UpdateExecutor;
pub use resolver::UpdateResolver;
