pub mod extraction;
pub mod http_client;
pub mod prompts;

pub use extraction::*;
