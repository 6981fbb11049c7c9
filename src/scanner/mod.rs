//! Page scanning module
//!
//! Produces findings and outbound links for single pages.

mod findings;
mod page;

pub use findings::Finding;
pub use page::{extract_links, PageScan, PageScanner};
