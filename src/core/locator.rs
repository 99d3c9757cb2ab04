use crate::config::layout::GalleryLayout;
use crate::core::document::{has_class, Document};
use kuchikiki::NodeRef;

/// One gallery entry. Holds a handle into the document tree.
#[derive(Debug, Clone)]
pub struct Card {
    node: NodeRef,
}

impl Card {
    pub fn new(node: NodeRef) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &NodeRef {
        &self.node
    }
}

/// Collects the gallery cards in document order.
///
/// Cards are the direct children of the gallery's first grid container that
/// carry the card class; when there are none, any descendant of the grid with
/// that class counts. A missing gallery or grid yields an empty list.
pub fn locate(document: &Document, layout: &GalleryLayout) -> Vec<Card> {
    let Some(gallery) = document.find_by_id(&layout.gallery_id) else {
        tracing::debug!("No element with id '{}'", layout.gallery_id);
        return Vec::new();
    };

    let Some(grid) = gallery
        .descendants()
        .find(|node| has_class(node, &layout.grid_class))
    else {
        tracing::debug!(
            "No '.{}' container inside #{}",
            layout.grid_class,
            layout.gallery_id
        );
        return Vec::new();
    };

    let cards: Vec<Card> = grid
        .children()
        .filter(|node| has_class(node, &layout.card_class))
        .map(Card::new)
        .collect();
    if !cards.is_empty() {
        return cards;
    }

    tracing::debug!("No direct '.{}' children, searching deeper", layout.card_class);
    grid.descendants()
        .filter(|node| has_class(node, &layout.card_class))
        .map(Card::new)
        .collect()
}
