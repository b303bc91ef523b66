pub mod aggregator;
pub mod category;
pub mod cli;
pub mod data_loader;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod rating_context;
pub mod report;
pub mod tier_table;
pub mod util;

pub use engine::RatingEngine;
pub use error::{LoadError, RatingError};
