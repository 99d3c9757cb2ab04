use clap::Parser;
use gallery_edit::utils::{logger, validation::Validate};
use gallery_edit::{CliConfig, GalleryEditor, GalleryError, GalleryLayout, LocalStorage};

fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(e);
    }

    let layout = match config.layout.as_deref() {
        Some(path) => match load_layout(path) {
            Ok(layout) => layout,
            Err(e) => fail(e),
        },
        None => GalleryLayout::default(),
    };

    let editor = GalleryEditor::with_layout(LocalStorage::default(), config, layout);

    match editor.run() {
        Ok(summary) if summary.written => println!("Updated {}", summary.output_path),
        Ok(summary) => println!(
            "Dry run: {} records would be applied to {}",
            summary.report.applied, summary.output_path
        ),
        Err(e) => fail(e),
    }
}

/// Any problem with the layout file is an input error, including a failed read.
fn load_layout(path: &str) -> Result<GalleryLayout, GalleryError> {
    let layout = GalleryLayout::from_file(path).map_err(|e| match e {
        GalleryError::IoError(io) => GalleryError::ConfigValidationError {
            field: "layout".to_string(),
            message: format!("cannot read {}: {}", path, io),
        },
        other => other,
    })?;
    layout.validate()?;
    tracing::debug!("Layout: {:?}", layout);
    Ok(layout)
}

fn fail(e: GalleryError) -> ! {
    tracing::error!("{} (category: {:?})", e, e.category());
    tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("{}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}
