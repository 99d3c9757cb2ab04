use crate::config::layout::GalleryLayout;
use crate::core::document::{replace_text, set_attribute};
use crate::core::locator::Card;
use crate::core::rules::CardField;
use crate::domain::model::UpdateRecord;

pub struct CardUpdater<'a> {
    layout: &'a GalleryLayout,
}

impl<'a> CardUpdater<'a> {
    pub fn new(layout: &'a GalleryLayout) -> Self {
        Self { layout }
    }

    /// Writes every field present in `record` into `card`. Fields whose target
    /// element is missing from the card are skipped without a warning.
    pub fn apply(&self, card: &Card, record: &UpdateRecord) {
        let fields = [
            (CardField::Image, &record.image),
            (CardField::Date, &record.date),
            (CardField::Title, &record.title),
            (CardField::Description, &record.description),
        ];

        for (field, value) in fields {
            let Some(value) = value.as_deref() else {
                continue;
            };
            let Some((rule, element)) = field.locate(card.node(), self.layout) else {
                tracing::debug!("{:?}: no target element in card, skipping", field);
                continue;
            };

            tracing::debug!("{:?} via {} -> {:?}", field, rule.name(), value);
            match field {
                CardField::Image => set_attribute(&element, "src", value),
                CardField::Date | CardField::Title | CardField::Description => {
                    replace_text(&element, value)
                }
            }
        }
    }
}
