pub mod cleanup;
pub mod links;
pub mod resolver;

pub use cleanup::CleanupService;
pub use links::LinkService;
pub use resolver::{Resolution, Resolver};
