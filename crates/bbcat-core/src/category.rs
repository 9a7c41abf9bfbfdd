//! The closed vocabulary of component categories used by fitment.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A semantic label for an interchangeable component. Every component
/// record is classified into at most one category; a bottle is associated
/// with a set of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ComponentCategory {
    ShortCap,
    TallCap,
    Reducer,
    Sprayer,
    AntiqueBulbSprayer,
    Dropper,
    LotionPump,
    PlasticRoller,
    MetalRoller,
    RollOnCap,
}

impl ComponentCategory {
    pub const ALL: [ComponentCategory; 10] = [
        ComponentCategory::ShortCap,
        ComponentCategory::TallCap,
        ComponentCategory::Reducer,
        ComponentCategory::Sprayer,
        ComponentCategory::AntiqueBulbSprayer,
        ComponentCategory::Dropper,
        ComponentCategory::LotionPump,
        ComponentCategory::PlasticRoller,
        ComponentCategory::MetalRoller,
        ComponentCategory::RollOnCap,
    ];

    /// The three parts of a roller assembly: two interchangeable inserts
    /// and the outer lid that fits over either.
    pub const ROLLER_SYSTEM: [ComponentCategory; 3] = [
        ComponentCategory::PlasticRoller,
        ComponentCategory::MetalRoller,
        ComponentCategory::RollOnCap,
    ];

    /// The catalog-facing label, e.g. `"Roll-On Cap"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ComponentCategory::ShortCap => "Short Cap",
            ComponentCategory::TallCap => "Tall Cap",
            ComponentCategory::Reducer => "Reducer",
            ComponentCategory::Sprayer => "Sprayer",
            ComponentCategory::AntiqueBulbSprayer => "Antique Bulb Sprayer",
            ComponentCategory::Dropper => "Dropper",
            ComponentCategory::LotionPump => "Lotion Pump",
            ComponentCategory::PlasticRoller => "Plastic Roller",
            ComponentCategory::MetalRoller => "Metal Roller",
            ComponentCategory::RollOnCap => "Roll-On Cap",
        }
    }
}

impl std::fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComponentCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ComponentCategory::ALL
            .into_iter()
            .find(|c| c.label() == trimmed)
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for ComponentCategory {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ComponentCategory> for String {
    fn from(value: ComponentCategory) -> Self {
        value.label().to_string()
    }
}

/// What a fitment-rules column header folds to.
///
/// `RollerSystem` is synthetic: it never appears in a bottle's compatible
/// set and expands to [`ComponentCategory::ROLLER_SYSTEM`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HeaderTarget {
    Category(ComponentCategory),
    RollerSystem,
}

impl HeaderTarget {
    pub const ROLLER_SYSTEM_LABEL: &'static str = "Roller System";

    /// The concrete categories a marked column contributes.
    #[must_use]
    pub fn categories(self) -> &'static [ComponentCategory] {
        match self {
            HeaderTarget::Category(category) => category_slice(category),
            HeaderTarget::RollerSystem => &ComponentCategory::ROLLER_SYSTEM,
        }
    }
}

fn category_slice(category: ComponentCategory) -> &'static [ComponentCategory] {
    use ComponentCategory as C;
    match category {
        C::ShortCap => &[C::ShortCap],
        C::TallCap => &[C::TallCap],
        C::Reducer => &[C::Reducer],
        C::Sprayer => &[C::Sprayer],
        C::AntiqueBulbSprayer => &[C::AntiqueBulbSprayer],
        C::Dropper => &[C::Dropper],
        C::LotionPump => &[C::LotionPump],
        C::PlasticRoller => &[C::PlasticRoller],
        C::MetalRoller => &[C::MetalRoller],
        C::RollOnCap => &[C::RollOnCap],
    }
}

impl FromStr for HeaderTarget {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == Self::ROLLER_SYSTEM_LABEL {
            return Ok(HeaderTarget::RollerSystem);
        }
        s.parse::<ComponentCategory>()
            .map(HeaderTarget::Category)
            .map_err(|_| CoreError::UnknownHeaderTarget(s.to_string()))
    }
}

impl TryFrom<String> for HeaderTarget {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HeaderTarget> for String {
    fn from(value: HeaderTarget) -> Self {
        match value {
            HeaderTarget::Category(category) => category.label().to_string(),
            HeaderTarget::RollerSystem => HeaderTarget::ROLLER_SYSTEM_LABEL.to_string(),
        }
    }
}
