mod link;

pub use link::{LinkEntry, TokenPayload};
