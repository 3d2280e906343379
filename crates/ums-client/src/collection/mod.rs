//! Active users, soft-deleted users and the current page.

mod activity;
mod filter;
mod manager;
mod page;

pub use activity::Activity;
pub use filter::search;
pub use manager::{CollectionSnapshot, SYNTHETIC_ID_RANGE, UserCollectionManager};
pub use page::{PageDescriptor, PageOutcome, PageStep};
