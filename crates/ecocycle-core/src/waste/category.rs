use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Waste material category the vision model is asked to assign.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumString,
    EnumIter
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    /// Bottles, containers, bags, packaging, toys.
    Plastic,
    /// Newspapers, cardboard, books, documents.
    Paper,
    /// Cans, foil, appliances, tools.
    Metal,
    /// Bottles, jars, windows, mirrors.
    Glass,
    /// Food waste, plant matter, biodegradable items.
    Organic,
    /// Anything that does not fit the categories above.
    Other,
}

impl Category {
    /// Parses a category name as written by the model.
    ///
    /// Matching ignores ASCII case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        label.trim().parse().ok()
    }

    /// Returns whether pricing policy always treats this category as non-recyclable,
    /// independent of its table price.
    pub const fn is_never_recyclable(self) -> bool {
        matches!(self, Self::Organic | Self::Other)
    }
}
