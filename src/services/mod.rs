pub mod google_scraper;
pub mod keyword_monitor;
pub mod search_scraper;

pub use google_scraper::*;
pub use keyword_monitor::*;
pub use search_scraper::*;
