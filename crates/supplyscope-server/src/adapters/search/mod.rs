//! Web search adapters

mod brave;
mod duckduckgo;
mod google_news;

pub use brave::BraveSearch;
pub use duckduckgo::DuckDuckGoSearch;
pub use google_news::GoogleNewsSearch;
