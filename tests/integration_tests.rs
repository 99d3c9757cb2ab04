use gallery_edit::core::locator::locate;
use gallery_edit::{
    CliConfig, Document, GalleryEditor, GalleryError, GalleryLayout, LocalStorage, MatchMode,
};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="id">
<head><title>HMPS</title></head>
<body>
<section id="beranda"><h3>Not a card</h3><p>Intro</p></section>
<section id="galeri" class="py-20">
  <div class="container mx-auto">
    <div class="grid md:grid-cols-3 gap-8">
      <div class="bg-white rounded-xl card-hover">
        <div class="ratio-3-2"><img src="img/galeri1.jpg" alt="Galeri 1"></div>
        <div class="p-6">
          <div class="flex items-center text-gray-500 text-sm mb-2"><i class="fas fa-calendar mr-2"></i><span>12 Mei 2025</span></div>
          <h3 class="text-xl font-bold">Bakti Sosial</h3>
          <p class="text-gray-600">Kegiatan bakti sosial di desa binaan.</p>
        </div>
      </div>
      <div class="bg-white rounded-xl card-hover">
        <div class="ratio-3-2"><img src="img/galeri2.jpg" alt="Galeri 2"></div>
        <div class="p-6">
          <div class="flex items-center text-gray-500 text-sm mb-2"><i class="fas fa-calendar mr-2"></i><span>3 Juni 2025</span></div>
          <h3 class="text-xl font-bold">Seminar Keperawatan</h3>
          <p class="text-gray-600">Seminar nasional keperawatan.</p>
        </div>
      </div>
      <div class="bg-white rounded-xl card-hover">
        <div class="ratio-3-2"><img src="img/galeri3.jpg" alt="Galeri 3"></div>
        <div class="p-6">
          <div class="flex items-center text-gray-500 text-sm mb-2"><i class="fas fa-calendar mr-2"></i><span>20 Juli 2025</span></div>
          <h3 class="text-xl font-bold">Makrab</h3>
          <p class="text-gray-600">Malam keakraban angkatan.</p>
        </div>
      </div>
    </div>
  </div>
</section>
</body>
</html>
"#;

struct Site {
    dir: TempDir,
}

impl Site {
    fn new(html: &str, mapping: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), html).unwrap();
        fs::write(dir.path().join("mapping.json"), mapping).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> String {
        self.dir.path().join(name).to_str().unwrap().to_string()
    }

    fn config(&self, mode: MatchMode) -> CliConfig {
        CliConfig {
            mapping: self.path("mapping.json"),
            file: self.path("index.html"),
            mode,
            no_backup: false,
            layout: None,
            dry_run: false,
            verbose: false,
        }
    }

    fn run(&self, config: CliConfig) -> gallery_edit::Result<gallery_edit::core::RunSummary> {
        GalleryEditor::new(LocalStorage::default(), config).run()
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).unwrap()
    }
}

/// (image, date, title, description) per card.
fn card_fields(html: &str) -> Vec<(String, String, String, String)> {
    use gallery_edit::core::document::{attribute, normalized_text};
    use gallery_edit::core::rules::CardField;

    let doc = Document::parse(html);
    let layout = GalleryLayout::default();
    locate(&doc, &layout)
        .iter()
        .map(|card| {
            let text = |field: CardField| {
                field
                    .locate(card.node(), &layout)
                    .map(|(_, node)| normalized_text(&node))
                    .unwrap_or_default()
            };
            let image = CardField::Image
                .locate(card.node(), &layout)
                .and_then(|(_, node)| attribute(&node, "src"))
                .unwrap_or_default();
            (
                image,
                text(CardField::Date),
                text(CardField::Title),
                text(CardField::Description),
            )
        })
        .collect()
}

#[test]
fn test_locates_cards_in_document_order() {
    let doc = Document::parse(INDEX_HTML);
    let cards = locate(&doc, &GalleryLayout::default());
    assert_eq!(cards.len(), 3);

    let titles: Vec<String> = card_fields(INDEX_HTML).into_iter().map(|f| f.2).collect();
    assert_eq!(titles, vec!["Bakti Sosial", "Seminar Keperawatan", "Makrab"]);
}

#[test]
fn test_position_mode_changes_only_target_card() {
    let site = Site::new(
        INDEX_HTML,
        r#"{"items": [{"position": 2, "title": "T"}]}"#,
    );
    let before = card_fields(INDEX_HTML);

    let summary = site.run(site.config(MatchMode::Position)).unwrap();
    assert!(summary.written);
    assert!(summary.report.warnings.is_empty());

    let after = card_fields(&site.read("index.html"));
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
    assert_eq!(after[1].2, "T");
    assert_eq!(after[1].0, before[1].0);
    assert_eq!(after[1].1, before[1].1);
    assert_eq!(after[1].3, before[1].3);
}

#[test]
fn test_full_record_updates_every_field() {
    let site = Site::new(
        INDEX_HTML,
        r#"{"items": [{"index": 1, "image": "new1.png", "date": "1 Jan 2026", "title": "New Title 1", "description": "New description 1"}]}"#,
    );

    site.run(site.config(MatchMode::Position)).unwrap();

    let after = card_fields(&site.read("index.html"));
    assert_eq!(
        after[0],
        (
            "new1.png".to_string(),
            "1 Jan 2026".to_string(),
            "New Title 1".to_string(),
            "New description 1".to_string()
        )
    );
    // The icon in the date row survives; only the label text changes.
    assert!(site.read("index.html").contains(r#"<i class="fas fa-calendar mr-2"></i><span>1 Jan 2026</span>"#));
}

#[test]
fn test_out_of_bounds_position_warns_and_changes_nothing() {
    let site = Site::new(
        INDEX_HTML,
        r#"{"items": [{"position": 4, "title": "Nope"}]}"#,
    );

    let summary = site.run(site.config(MatchMode::Position)).unwrap();

    assert_eq!(summary.report.applied, 0);
    assert_eq!(summary.report.warnings.len(), 1);
    assert!(summary.report.warnings[0].to_string().contains("position 4"));
    assert_eq!(card_fields(&site.read("index.html")), card_fields(INDEX_HTML));
}

#[test]
fn test_absent_description_kept_and_empty_description_cleared() {
    let site = Site::new(
        INDEX_HTML,
        r#"{"items": [{"position": 1, "title": "Only title"}, {"position": 2, "description": ""}]}"#,
    );

    site.run(site.config(MatchMode::Position)).unwrap();

    let after = card_fields(&site.read("index.html"));
    assert_eq!(after[0].3, "Kegiatan bakti sosial di desa binaan.");
    assert_eq!(after[1].3, "");
    assert!(site
        .read("index.html")
        .contains(r#"<p class="text-gray-600"></p>"#));
}

#[test]
fn test_title_mode_updates_matching_card_image() {
    let site = Site::new(
        INDEX_HTML,
        r#"{"items": [{"title_match": "Seminar Keperawatan", "image": "b2.png"}, {"title_match": "Unknown"}]}"#,
    );

    let summary = site.run(site.config(MatchMode::Title)).unwrap();

    assert_eq!(summary.report.applied, 1);
    assert_eq!(summary.report.warnings.len(), 1);
    let images: Vec<String> = card_fields(&site.read("index.html"))
        .into_iter()
        .map(|f| f.0)
        .collect();
    assert_eq!(images, vec!["img/galeri1.jpg", "b2.png", "img/galeri3.jpg"]);
}

#[test]
fn test_empty_gallery_in_position_mode_writes_nothing() {
    let html = "<html><body><section id=\"galeri\"><div class=\"grid\"></div></section></body></html>";
    let site = Site::new(html, r#"{"items": [{"position": 1, "title": "T"}]}"#);

    let err = site.run(site.config(MatchMode::Position)).unwrap_err();

    assert!(matches!(err, GalleryError::NoCardsFound { .. }));
    assert_ne!(err.exit_code(), 0);
    assert_eq!(site.read("index.html"), html);
    assert!(!Path::new(&site.path("index.html.bak")).exists());
}

#[test]
fn test_backup_matches_original_bytes() {
    let site = Site::new(
        INDEX_HTML,
        r#"{"items": [{"position": 3, "date": "1 Agustus 2025"}]}"#,
    );

    let summary = site.run(site.config(MatchMode::Position)).unwrap();

    assert_eq!(summary.backup_path, Some(site.path("index.html.bak")));
    assert_eq!(site.read("index.html.bak"), INDEX_HTML);
    assert_ne!(site.read("index.html"), INDEX_HTML);
}

#[test]
fn test_no_backup_flag() {
    let site = Site::new(INDEX_HTML, r#"{"items": [{"position": 1, "title": "X"}]}"#);
    let mut config = site.config(MatchMode::Position);
    config.no_backup = true;

    let summary = site.run(config).unwrap();

    assert_eq!(summary.backup_path, None);
    assert!(!Path::new(&site.path("index.html.bak")).exists());
}

#[test]
fn test_applying_twice_is_idempotent() {
    let mapping = r#"{"items": [
        {"position": 1, "image": "a.png", "date": "1 Jan", "title": "One", "description": "First"},
        {"position": 3, "title": "Three", "description": ""}
    ]}"#;
    let site = Site::new(INDEX_HTML, mapping);

    site.run(site.config(MatchMode::Position)).unwrap();
    let once = site.read("index.html");
    site.run(site.config(MatchMode::Position)).unwrap();
    let twice = site.read("index.html");

    assert_eq!(once, twice);
}

#[test]
fn test_custom_layout_file() {
    let html = r#"<html><body><div id="gallery"><ul class="tiles">
        <li class="tile"><h2>Old</h2></li>
        <li class="tile"><h2>Other</h2></li>
    </ul></div></body></html>"#;
    let site = Site::new(html, r#"{"items": [{"position": 1, "title": "New"}]}"#);
    let layout = GalleryLayout::from_toml_str(
        r#"
        gallery_id = "gallery"
        grid_class = "tiles"
        card_class = "tile"
        title_tag = "h2"
        "#,
    )
    .unwrap();

    GalleryEditor::with_layout(
        LocalStorage::default(),
        site.config(MatchMode::Position),
        layout,
    )
    .run()
    .unwrap();

    let output = site.read("index.html");
    assert!(output.contains(r#"<li class="tile"><h2>New</h2></li>"#));
    assert!(output.contains("<h2>Other</h2>"));
}

#[test]
fn test_cli_exit_codes() {
    let bin = env!("CARGO_BIN_EXE_gallery-edit");

    let site = Site::new(INDEX_HTML, r#"{"items": [{"position": 1, "title": "CLI"}]}"#);
    let output = Command::new(bin)
        .arg(site.path("mapping.json"))
        .arg("--file")
        .arg(site.path("index.html"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("Updated {}", site.path("index.html"))));

    let missing = Command::new(bin)
        .arg(site.path("missing.json"))
        .arg("--file")
        .arg(site.path("index.html"))
        .output()
        .unwrap();
    assert_eq!(missing.status.code(), Some(2));

    let empty = Site::new("<html><body></body></html>", r#"{"items": []}"#);
    let no_cards = Command::new(bin)
        .arg(empty.path("mapping.json"))
        .arg("--file")
        .arg(empty.path("index.html"))
        .output()
        .unwrap();
    assert_eq!(no_cards.status.code(), Some(1));
    assert!(!Path::new(&empty.path("index.html.bak")).exists());
}

#[test]
fn test_malformed_positions_skip_only_their_records() {
    let site = Site::new(
        INDEX_HTML,
        r#"{"items": [
            {"position": "2", "title": "From string"},
            {"position": 2.5, "title": "Half"},
            {"position": 1e20, "title": "Huge"},
            {"position": 99999999999999999999, "title": "Huge too"},
            {"position": 1, "title": "ok"}
        ]}"#,
    );

    let summary = site.run(site.config(MatchMode::Position)).unwrap();

    assert!(summary.written);
    assert_eq!(summary.report.applied, 2);
    assert_eq!(summary.report.warnings.len(), 3);
    assert!(summary.report.warnings[0].to_string().contains("2.5"));

    let titles: Vec<String> = card_fields(&site.read("index.html"))
        .into_iter()
        .map(|f| f.2)
        .collect();
    assert_eq!(titles, vec!["ok", "From string", "Makrab"]);
}

#[test]
fn test_position_and_index_in_one_record_prefers_position() {
    let site = Site::new(
        INDEX_HTML,
        r#"{"items": [{"position": 3, "index": 1, "title": "Third"}]}"#,
    );

    let summary = site.run(site.config(MatchMode::Position)).unwrap();

    assert!(summary.report.warnings.is_empty());
    let titles: Vec<String> = card_fields(&site.read("index.html"))
        .into_iter()
        .map(|f| f.2)
        .collect();
    assert_eq!(titles, vec!["Bakti Sosial", "Seminar Keperawatan", "Third"]);
}

#[test]
fn test_unreadable_target_is_input_error() {
    let site = Site::new(INDEX_HTML, r#"{"items": [{"position": 1, "title": "X"}]}"#);
    let invalid_utf8: &[u8] = &[0x3c, 0x70, 0x3e, 0xff, 0xfe, 0x3c, 0x2f, 0x70, 0x3e];
    fs::write(site.dir.path().join("index.html"), invalid_utf8).unwrap();

    let err = site.run(site.config(MatchMode::Position)).unwrap_err();

    assert!(matches!(err, GalleryError::ReadError { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(!Path::new(&site.path("index.html.bak")).exists());
    assert_eq!(fs::read(site.dir.path().join("index.html")).unwrap(), invalid_utf8);
}
