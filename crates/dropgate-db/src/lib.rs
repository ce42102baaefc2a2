//! Link registry: durable id -> LinkEntry mapping with a uniqueness
//! guarantee. Backends: Postgres for production, in-memory for tests.

pub mod memory;
pub mod postgres;
pub mod registry;

pub use memory::MemoryLinkRegistry;
pub use postgres::{run_migrations, PgLinkRegistry};
pub use registry::LinkRegistry;
