//! The fixed list of purchasable items.

use std::collections::HashSet;

use thiserror::Error;

use super::item::{Item, ItemId};
use super::money::Price;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Duplicate item id in catalog: {0}")]
    DuplicateItem(ItemId),
}

/// Read-only, fixed-order sequence of items.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Builds a catalog, keeping the given order.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateItem`] if two items share an id.
    pub fn new(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(CatalogError::DuplicateItem(item.id()));
            }
        }
        Ok(Self { items })
    }

    /// The built-in plant shop catalog.
    pub fn plants() -> Self {
        let items = vec![
            Item::new(
                1,
                "Monstera Deliciosa",
                Price::from_cents(2499),
                "Beautiful Swiss Cheese Plant with large leaves",
            )
            .with_glyph("🌿"),
            Item::new(
                2,
                "Snake Plant",
                Price::from_cents(1999),
                "Low maintenance air purifying plant",
            )
            .with_glyph("🌱"),
            Item::new(
                3,
                "Fiddle Leaf Fig",
                Price::from_cents(3499),
                "Popular indoor tree with large violin-shaped leaves",
            )
            .with_glyph("🪴")
            .out_of_stock(),
            Item::new(
                4,
                "Peace Lily",
                Price::from_cents(2299),
                "Elegant flowering plant that thrives in shade",
            )
            .with_glyph("🌸"),
            Item::new(
                5,
                "Aloe Vera",
                Price::from_cents(1599),
                "Healing succulent that's easy to care for",
            )
            .with_glyph("🌵"),
            Item::new(
                6,
                "Pothos",
                Price::from_cents(1899),
                "Trailing vine plant perfect for hanging baskets",
            )
            .with_glyph("🍃"),
        ];
        Self { items }
    }

    pub fn list_items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
