//! Element matching rules for the parts of a card.
//!
//! Each card field has an ordered chain of rules; the first rule that finds an
//! element wins. Rules only look inside the card they are given.

use crate::config::layout::GalleryLayout;
use crate::core::document::{has_all_classes, is_tag};
use kuchikiki::NodeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRule {
    /// First image element in the card.
    FirstImage,
    /// First label inside a metadata row (an element carrying every
    /// `date_row_classes` class, e.g. the row holding the calendar icon).
    IconRowLabel,
    /// First label element anywhere in the card.
    FirstLabel,
    /// First heading element in the card.
    FirstHeading,
    /// First paragraph that contains no icon element.
    FirstParagraphWithoutIcon,
}

const IMAGE_RULES: &[ElementRule] = &[ElementRule::FirstImage];
const DATE_RULES: &[ElementRule] = &[ElementRule::IconRowLabel, ElementRule::FirstLabel];
const TITLE_RULES: &[ElementRule] = &[ElementRule::FirstHeading];
const DESCRIPTION_RULES: &[ElementRule] = &[ElementRule::FirstParagraphWithoutIcon];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Image,
    Date,
    Title,
    Description,
}

impl CardField {
    pub fn rules(self) -> &'static [ElementRule] {
        match self {
            CardField::Image => IMAGE_RULES,
            CardField::Date => DATE_RULES,
            CardField::Title => TITLE_RULES,
            CardField::Description => DESCRIPTION_RULES,
        }
    }

    /// Runs the rule chain and reports which rule matched.
    pub fn locate(self, card: &NodeRef, layout: &GalleryLayout) -> Option<(ElementRule, NodeRef)> {
        self.rules()
            .iter()
            .find_map(|rule| rule.find(card, layout).map(|node| (*rule, node)))
    }
}

impl ElementRule {
    pub fn name(self) -> &'static str {
        match self {
            ElementRule::FirstImage => "first-image",
            ElementRule::IconRowLabel => "icon-row-label",
            ElementRule::FirstLabel => "first-label",
            ElementRule::FirstHeading => "first-heading",
            ElementRule::FirstParagraphWithoutIcon => "first-paragraph-without-icon",
        }
    }

    pub fn find(self, card: &NodeRef, layout: &GalleryLayout) -> Option<NodeRef> {
        match self {
            ElementRule::FirstImage => first_tag(card, &layout.image_tag),
            ElementRule::IconRowLabel => card.descendants().find(|node| {
                is_tag(node, &layout.date_label_tag) && in_metadata_row(node, card, layout)
            }),
            ElementRule::FirstLabel => first_tag(card, &layout.date_label_tag),
            ElementRule::FirstHeading => first_tag(card, &layout.title_tag),
            ElementRule::FirstParagraphWithoutIcon => card.descendants().find(|node| {
                is_tag(node, &layout.description_tag)
                    && !node.descendants().any(|n| is_tag(&n, &layout.icon_tag))
            }),
        }
    }
}

fn first_tag(card: &NodeRef, tag: &str) -> Option<NodeRef> {
    card.descendants().find(|node| is_tag(node, tag))
}

/// Walks from `node` up to and including `card`, looking for a metadata row.
fn in_metadata_row(node: &NodeRef, card: &NodeRef, layout: &GalleryLayout) -> bool {
    for ancestor in node.ancestors() {
        if has_all_classes(&ancestor, &layout.date_row_classes) {
            return true;
        }
        if ancestor == *card {
            break;
        }
    }
    false
}
