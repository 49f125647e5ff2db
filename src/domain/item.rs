use std::fmt;

use super::money::Price;

/// Stable catalog identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A catalog entry. Immutable once built; the cart only ever holds copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    name: String,
    price: Price,
    glyph: String,
    description: String,
    in_stock: bool,
}

impl Item {
    /// Creates an in-stock item with no glyph.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        price: Price,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            price,
            glyph: String::new(),
            description: description.into(),
            in_stock: true,
        }
    }

    pub fn with_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.glyph = glyph.into();
        self
    }

    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Unavailable items stay listed but cannot be added to a cart.
    pub fn is_available(&self) -> bool {
        self.in_stock
    }
}
