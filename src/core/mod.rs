pub mod analysis;
pub mod charts;
pub mod discount;
pub mod fetcher;
pub mod file_transform;
pub mod file_viewer;
pub mod iris;
pub mod phones;
pub mod runner;
pub mod stats;
pub mod vehicles;

pub use crate::domain::ports::{Lab, Storage};
pub use crate::utils::error::Result;
