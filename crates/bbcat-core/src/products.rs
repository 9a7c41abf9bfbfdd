use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::category::ComponentCategory;

const WEBSITE_SKU: &str = "websiteSku";
const CATEGORY: &str = "category";
const FAMILY: &str = "family";
const APPLICATOR: &str = "applicator";
const NECK_THREAD_SIZE: &str = "neckThreadSize";
const ITEM_NAME: &str = "itemName";
const COMPONENTS: &str = "components";
const FITMENT_STATUS: &str = "fitmentStatus";
const CATALOG_GAPS: &str = "catalogGaps";

/// One row of the catalog: a bottle, a component, or anything else the
/// retailer sells.
///
/// The record is kept as the JSON object it was read from. Typed accessors
/// read the attributes fitment needs; a value of the wrong type reads as
/// absent. Writes touch only the keys a pass owns, so every other key keeps
/// its value, its position, and any explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRecord {
    fields: Map<String, Value>,
}

impl ProductRecord {
    /// A record with only a SKU and category set.
    #[must_use]
    pub fn new(website_sku: impl Into<String>, category: impl Into<String>) -> Self {
        let website_sku: String = website_sku.into();
        let category: String = category.into();
        let mut record = Self::default();
        record.set(WEBSITE_SKU, website_sku);
        record.set(CATEGORY, category);
        record
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Sets `key`, keeping its position when already present.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Website SKU, the stable identifier across passes. Empty when absent
    /// or `null`.
    #[must_use]
    pub fn website_sku(&self) -> &str {
        self.text(WEBSITE_SKU).unwrap_or_default()
    }

    /// e.g. `"Glass Bottle"`, `"Component"`, `"Cap/Closure"`. Empty when
    /// absent or `null`.
    #[must_use]
    pub fn category(&self) -> &str {
        self.text(CATEGORY).unwrap_or_default()
    }

    #[must_use]
    pub fn family(&self) -> Option<&str> {
        self.text(FAMILY)
    }

    /// Free-text and inconsistently populated; see the applicator
    /// normalization pass.
    #[must_use]
    pub fn applicator(&self) -> Option<&str> {
        self.text(APPLICATOR)
    }

    /// Replaces the applicator. `None` writes an explicit `null`.
    pub fn set_applicator(&mut self, applicator: Option<String>) {
        self.set(APPLICATOR, applicator);
    }

    #[must_use]
    pub fn item_name(&self) -> Option<&str> {
        self.text(ITEM_NAME)
    }

    /// The thread size with surrounding whitespace removed, or `None` when
    /// absent or blank.
    #[must_use]
    pub fn thread(&self) -> Option<&str> {
        self.text(NECK_THREAD_SIZE)
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// The bottle fitment recorded on this record. `None` when there is no
    /// `fitmentStatus` or the fields do not read as a bottle's (component
    /// records carry `"fitmentStatus": "component"`).
    #[must_use]
    pub fn fitment(&self) -> Option<FitmentFields> {
        let fitment_status = FitmentStatus::deserialize(self.fields.get(FITMENT_STATUS)?).ok()?;
        let components = match self.fields.get(COMPONENTS) {
            None | Some(Value::Null) => None,
            Some(value) => Some(ComponentMap::deserialize(value).ok()?),
        };
        let catalog_gaps = match self.fields.get(CATALOG_GAPS) {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => Vec::<ComponentCategory>::deserialize(value).ok()?,
        };
        Some(FitmentFields {
            components,
            fitment_status,
            catalog_gaps,
        })
    }

    /// Overwrites `components`, `fitmentStatus` and `catalogGaps`.
    /// `components` is written as `null` when absent.
    pub fn set_fitment(&mut self, fitment: &FitmentFields) {
        self.set(
            COMPONENTS,
            fitment.components.as_ref().map_or(Value::Null, Value::from),
        );
        self.set(FITMENT_STATUS, fitment.fitment_status.as_str());
        self.set(
            CATALOG_GAPS,
            fitment
                .catalog_gaps
                .iter()
                .map(|c| Value::from(c.label()))
                .collect::<Vec<_>>(),
        );
    }

    /// The compact form of this record embedded in a bottle's `components`.
    /// Values are copied as they appear in the record.
    #[must_use]
    pub fn summary(&self) -> ComponentSummary {
        let copy = |key: &str| self.fields.get(key).cloned().unwrap_or(Value::Null);
        ComponentSummary {
            website_sku: self.website_sku().to_string(),
            grace_sku: copy("graceSku"),
            item_name: copy(ITEM_NAME),
            web_price_1pc: copy("webPrice1pc"),
            cap_color: copy("capColor"),
            trim_color: copy("trimColor"),
            stock_status: copy("stockStatus"),
            ball_material: copy("ballMaterial"),
        }
    }
}

/// Fields the matrix builder owns on bottle records. Rewritten wholesale on
/// every rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct FitmentFields {
    pub components: Option<ComponentMap>,
    pub fitment_status: FitmentStatus,
    pub catalog_gaps: Vec<ComponentCategory>,
}

/// Completeness of a bottle's fitment mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitmentStatus {
    /// The bottle has no thread size.
    MissingThread,
    /// No rule code prefixes the SKU and the thread has no default set.
    UnknownThread,
    /// Every compatible category resolved to at least one component.
    Mapped,
    /// Some, but not all, compatible categories resolved.
    MappedPartial,
    /// No compatible category resolved.
    MappedNoComponents,
}

impl FitmentStatus {
    pub const ALL: [FitmentStatus; 5] = [
        FitmentStatus::MissingThread,
        FitmentStatus::UnknownThread,
        FitmentStatus::Mapped,
        FitmentStatus::MappedPartial,
        FitmentStatus::MappedNoComponents,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FitmentStatus::MissingThread => "missing_thread",
            FitmentStatus::UnknownThread => "unknown_thread",
            FitmentStatus::Mapped => "mapped",
            FitmentStatus::MappedPartial => "mapped_partial",
            FitmentStatus::MappedNoComponents => "mapped_no_components",
        }
    }
}

impl std::fmt::Display for FitmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compatible component as embedded in a bottle record. Everything but
/// the SKU is carried through untouched, `null` when the component lacks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSummary {
    #[serde(default)]
    pub website_sku: String,
    #[serde(default)]
    pub grace_sku: Value,
    #[serde(default)]
    pub item_name: Value,
    #[serde(default)]
    pub web_price_1pc: Value,
    #[serde(default)]
    pub cap_color: Value,
    #[serde(default)]
    pub trim_color: Value,
    #[serde(default)]
    pub stock_status: Value,
    #[serde(default)]
    pub ball_material: Value,
}

impl From<&ComponentSummary> for Value {
    fn from(summary: &ComponentSummary) -> Self {
        let mut map = Map::new();
        map.insert(WEBSITE_SKU.to_string(), Value::from(summary.website_sku.as_str()));
        map.insert("graceSku".to_string(), summary.grace_sku.clone());
        map.insert(ITEM_NAME.to_string(), summary.item_name.clone());
        map.insert("webPrice1pc".to_string(), summary.web_price_1pc.clone());
        map.insert("capColor".to_string(), summary.cap_color.clone());
        map.insert("trimColor".to_string(), summary.trim_color.clone());
        map.insert("stockStatus".to_string(), summary.stock_status.clone());
        map.insert("ballMaterial".to_string(), summary.ball_material.clone());
        Value::Object(map)
    }
}

/// Category to compatible components, in the order the bottle's rule lists
/// the categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentMap(Vec<(ComponentCategory, Vec<ComponentSummary>)>);

impl ComponentMap {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a category. A category already present is replaced in place.
    pub fn insert(&mut self, category: ComponentCategory, components: Vec<ComponentSummary>) {
        if let Some(slot) = self.0.iter_mut().find(|(c, _)| *c == category) {
            slot.1 = components;
        } else {
            self.0.push((category, components));
        }
    }

    #[must_use]
    pub fn get(&self, category: ComponentCategory) -> Option<&[ComponentSummary]> {
        self.0
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, v)| v.as_slice())
    }

    #[must_use]
    pub fn contains(&self, category: ComponentCategory) -> bool {
        self.0.iter().any(|(c, _)| *c == category)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = ComponentCategory> + '_ {
        self.0.iter().map(|(c, _)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentCategory, &[ComponentSummary])> + '_ {
        self.0.iter().map(|(c, v)| (*c, v.as_slice()))
    }
}

/// A JSON object whose key order is the map's order.
impl From<&ComponentMap> for Value {
    fn from(map: &ComponentMap) -> Self {
        let object: Map<String, Value> = map
            .iter()
            .map(|(category, components)| {
                let list = components.iter().map(Value::from).collect::<Vec<_>>();
                (category.label().to_string(), Value::Array(list))
            })
            .collect();
        Value::Object(object)
    }
}

impl<'de> Deserialize<'de> for ComponentMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ComponentMapVisitor;

        impl<'de> Visitor<'de> for ComponentMapVisitor {
            type Value = ComponentMap;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of component category to component list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = ComponentMap::new();
                while let Some((category, components)) =
                    access.next_entry::<ComponentCategory, Vec<ComponentSummary>>()?
                {
                    map.insert(category, components);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(ComponentMapVisitor)
    }
}
