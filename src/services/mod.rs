pub mod link_service;
pub mod policy;

pub use link_service::{LinkService, ListedLink, Resolved};
