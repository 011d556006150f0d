pub mod html_tag;
pub mod keyword_config;
pub mod report;
pub mod search_page;
