//! Job board helpers: bookmarks and list filtering.

pub mod filter;
pub mod saved;

pub use filter::{status_message, visible_page, JobFilter, JobSort, PAGE_SIZE};
pub use saved::SavedJobs;
