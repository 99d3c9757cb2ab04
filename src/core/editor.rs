use crate::config::layout::GalleryLayout;
use crate::core::applier::MappingApplier;
use crate::core::document::Document;
use crate::domain::model::{MappingFile, RunSummary};
use crate::domain::ports::{ConfigProvider, DocumentStore};
use crate::utils::error::{GalleryError, Result};

/// One edit run: load the mapping and the page, apply, back up, write.
///
/// Every fatal error is raised before the first write, so a failed run leaves
/// both the page and any previous backup untouched.
pub struct GalleryEditor<S: DocumentStore, C: ConfigProvider> {
    storage: S,
    config: C,
    layout: GalleryLayout,
}

impl<S: DocumentStore, C: ConfigProvider> GalleryEditor<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_layout(storage, config, GalleryLayout::default())
    }

    pub fn with_layout(storage: S, config: C, layout: GalleryLayout) -> Self {
        Self {
            storage,
            config,
            layout,
        }
    }

    /// Read failures happen before any write, so they count as input errors.
    fn read_input(&self, path: &str) -> Result<String> {
        self.storage.read_to_string(path).map_err(|e| match e {
            GalleryError::IoError(source) => GalleryError::ReadError {
                path: path.to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn run(&self) -> Result<RunSummary> {
        let mapping_path = self.config.mapping_path();
        let target_path = self.config.target_path();

        if !self.storage.exists(mapping_path) {
            return Err(GalleryError::MappingNotFound {
                path: mapping_path.to_string(),
            });
        }
        if !self.storage.exists(target_path) {
            return Err(GalleryError::TargetNotFound {
                path: target_path.to_string(),
            });
        }

        let mapping = MappingFile::from_json_str(&self.read_input(mapping_path)?)?;
        tracing::info!(
            "Loaded {} update records from {} ({} mode)",
            mapping.items.len(),
            mapping_path,
            self.config.match_mode()
        );

        let content = self.read_input(target_path)?;
        let document = Document::parse(&content);

        let report = MappingApplier::new(&self.layout, self.config.match_mode())
            .apply(&document, &mapping.items)?;
        tracing::info!(
            "Applied {} of {} records to {} cards ({} warnings)",
            report.applied,
            mapping.items.len(),
            report.cards_found,
            report.warnings.len()
        );

        if self.config.dry_run() {
            tracing::info!("Dry run: {} not written", target_path);
            return Ok(RunSummary {
                output_path: target_path.to_string(),
                backup_path: None,
                written: false,
                report,
            });
        }

        let html = document.to_html()?;

        let backup_path = if self.config.backup_enabled() {
            let backup = format!("{}.bak", target_path);
            tracing::info!("Creating backup: {}", backup);
            self.storage.copy(target_path, &backup)?;
            Some(backup)
        } else {
            None
        };

        self.storage.write(target_path, &html)?;
        tracing::debug!("Wrote {} bytes to {}", html.len(), target_path);

        Ok(RunSummary {
            output_path: target_path.to_string(),
            backup_path,
            written: true,
            report,
        })
    }
}
