pub mod catalog;
pub mod config;
pub mod controller;
pub mod csv_export;
pub mod error;
pub mod error_utils;
pub mod sentiment;
pub mod source;
pub mod summary;
pub mod types;

pub use catalog::*;
pub use config::*;
pub use controller::*;
pub use csv_export::*;
pub use error::*;
pub use error_utils::*;
pub use sentiment::*;
pub use source::*;
pub use summary::*;
pub use types::*;
