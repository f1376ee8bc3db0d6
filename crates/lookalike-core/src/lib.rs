pub mod classify;
pub mod config;
pub mod confusables;
mod data;
pub mod error;
pub mod point;
pub mod script;
pub mod table;

pub use confusables::{confusables, is_confusing, rectify_confusion};
pub use error::{Result, TableError};
pub use point::Point;
pub use table::{ConfusableEntry, ConfusableTable};
