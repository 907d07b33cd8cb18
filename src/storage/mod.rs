pub mod link;
pub mod owner_index;
pub mod store;

pub use link::{OwnerId, ShortLink};
pub use owner_index::OwnerIndex;
pub use store::LinkStore;
