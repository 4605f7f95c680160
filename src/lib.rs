pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, Cli, Command};
pub use core::runner::LabRunner;
pub use domain::ports::{Lab, Storage};
pub use utils::error::{LabError, Result};
