pub mod applier;
pub mod document;
pub mod editor;
pub mod locator;
pub mod rules;
pub mod updater;

pub use crate::domain::model::{ApplyReport, ApplyWarning, MatchMode, RunSummary, UpdateRecord};
pub use crate::domain::ports::{ConfigProvider, DocumentStore};
pub use crate::utils::error::Result;
