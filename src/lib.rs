pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, layout::GalleryLayout, CliConfig};
pub use core::{applier::MappingApplier, document::Document, editor::GalleryEditor};
pub use domain::model::{MappingFile, MatchMode, UpdateRecord};
pub use utils::error::{GalleryError, Result};
