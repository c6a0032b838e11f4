pub mod ai;
pub mod export;
pub mod generator;
pub mod keywords;
pub mod models;
pub mod photos;
pub mod title;

pub use ai::ChatCompletionClient;
pub use generator::ListingGenerator;
pub use models::{ContentSource, ListingContent, ListingOptions, ListingStyle};
