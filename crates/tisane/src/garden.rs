//! # Garden Shop
//!
//! Plants are bought once with points and unlock the tea of the same name
//! in the kitchen.
//!
//! | Plant | Price |
//! |-------|-------|
//! | `manjericao_sagrado` | 100 |
//! | `amora_silvestre` | 250 |
//! | `lirio_encantado` | 400 |
//! | `margarida_apaixonante` | 600 |
//! | `lavanda_serenante` | 800 |
//! | `catnip` | 1600 |

use std::collections::BTreeMap;

/// Plant bought to unlock the catnip tea.
pub const CATNIP: &str = "catnip";

/// Price list of the garden shop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlantShop {
    plants: BTreeMap<String, u64>,
}

impl PlantShop {
    /// Creates a shop from `(name, price)` pairs.
    #[must_use]
    pub fn new<I, S>(plants: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self {
            plants: plants.into_iter().map(|(name, price)| (name.into(), price)).collect(),
        }
    }

    /// The six plants of the garden.
    #[must_use]
    pub fn garden() -> Self {
        Self::new([
            ("manjericao_sagrado", 100),
            ("amora_silvestre", 250),
            ("lirio_encantado", 400),
            ("margarida_apaixonante", 600),
            ("lavanda_serenante", 800),
            (CATNIP, 1_600),
        ])
    }

    /// Price of `name`, if the shop sells it.
    #[must_use]
    pub fn price(&self, name: &str) -> Option<u64> {
        self.plants.get(name).copied()
    }

    /// Iterates `(name, price)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.plants.iter().map(|(name, price)| (name.as_str(), *price))
    }

    /// Number of plants for sale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plants.len()
    }

    /// Returns true if nothing is for sale.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}
