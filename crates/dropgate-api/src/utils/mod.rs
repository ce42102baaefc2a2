pub mod link_token;
pub mod slug;
