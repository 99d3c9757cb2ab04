use crate::config::layout::GalleryLayout;
use crate::core::document::{normalized_text, Document};
use crate::core::locator::{locate, Card};
use crate::core::rules::CardField;
use crate::core::updater::CardUpdater;
use crate::domain::model::{ApplyReport, ApplyWarning, MatchMode, PositionKey, UpdateRecord};
use crate::utils::error::{GalleryError, Result};
use std::collections::HashMap;

/// Resolves each record to a gallery card and applies it, in file order.
pub struct MappingApplier<'a> {
    layout: &'a GalleryLayout,
    mode: MatchMode,
}

impl<'a> MappingApplier<'a> {
    pub fn new(layout: &'a GalleryLayout, mode: MatchMode) -> Self {
        Self { layout, mode }
    }

    pub fn apply(&self, document: &Document, records: &[UpdateRecord]) -> Result<ApplyReport> {
        let cards = locate(document, self.layout);
        tracing::debug!("Found {} gallery cards", cards.len());

        let mut report = ApplyReport {
            cards_found: cards.len(),
            ..Default::default()
        };

        match self.mode {
            MatchMode::Position => self.apply_by_position(&cards, records, &mut report)?,
            MatchMode::Title => self.apply_by_title(&cards, records, &mut report),
        }

        Ok(report)
    }

    fn apply_by_position(
        &self,
        cards: &[Card],
        records: &[UpdateRecord],
        report: &mut ApplyReport,
    ) -> Result<()> {
        if cards.is_empty() {
            return Err(GalleryError::NoCardsFound {
                gallery_id: self.layout.gallery_id.clone(),
            });
        }

        let updater = CardUpdater::new(self.layout);
        for record in records {
            let position = match record.resolved_position() {
                Some(PositionKey::Number(position)) => position,
                Some(PositionKey::Invalid(raw)) => {
                    warn(report, ApplyWarning::InvalidPosition { raw });
                    continue;
                }
                None => {
                    warn(report, ApplyWarning::MissingPosition);
                    continue;
                }
            };

            let card = usize::try_from(position)
                .ok()
                .and_then(|p| p.checked_sub(1))
                .and_then(|index| cards.get(index));

            match card {
                Some(card) => {
                    updater.apply(card, record);
                    report.applied += 1;
                }
                None => warn(
                    report,
                    ApplyWarning::PositionOutOfBounds {
                        position,
                        card_count: cards.len(),
                    },
                ),
            }
        }
        Ok(())
    }

    fn apply_by_title(&self, cards: &[Card], records: &[UpdateRecord], report: &mut ApplyReport) {
        // Built once from the titles before any edit; repeated titles keep the first card.
        let mut by_title: HashMap<String, &Card> = HashMap::new();
        for card in cards {
            if let Some((_, heading)) = CardField::Title.locate(card.node(), self.layout) {
                by_title.entry(normalized_text(&heading)).or_insert(card);
            }
        }

        let updater = CardUpdater::new(self.layout);
        for record in records {
            let Some(key) = record.match_key() else {
                warn(report, ApplyWarning::MissingTitleKey);
                continue;
            };

            let key = key.split_whitespace().collect::<Vec<_>>().join(" ");
            match by_title.get(&key) {
                Some(card) => {
                    updater.apply(card, record);
                    report.applied += 1;
                }
                None => warn(report, ApplyWarning::UnmatchedTitle { key }),
            }
        }
    }
}

fn warn(report: &mut ApplyReport, warning: ApplyWarning) {
    tracing::warn!("{}", warning);
    report.warnings.push(warning);
}
