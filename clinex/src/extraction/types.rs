//! Span, category and entity-set types shared by the extraction passes.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// A labeled character range produced by a tagger.
///
/// `start` and `end` form the half-open range `[start, end)` over the source
/// text. Taggers are trusted to emit `start < end`; nothing here re-validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Raw label exactly as the tagger reported it (e.g. "DRUG", "PERSON")
    pub label: String,
    /// The covered substring
    pub text: String,
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(label: impl Into<String>, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            start,
            end,
        }
    }

    /// The `(start, end)` range of this span.
    pub fn range(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Check whether this span's range overlaps another's.
    pub fn overlaps(&self, other: &Span) -> bool {
        super::overlap::spans_overlap(self.start, self.end, other.start, other.end)
    }
}

/// The closed set of semantic categories an entity can be grouped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Patient or clinician names
    Person,
    /// Patient age
    Age,
    /// Medication name
    Drug,
    /// Medication strength (e.g. "81mg")
    Strength,
    /// Administration frequency (e.g. "once daily")
    Frequency,
    /// Administration route (e.g. "orally")
    Route,
    /// Treatment duration (e.g. "for 7 days")
    Duration,
    /// Dosage form (e.g. "tablet")
    Form,
    /// Dosage amount (e.g. "2 tablets")
    Dosage,
    /// Diagnosis
    Diagnosis,
    /// Condition or symptom
    Condition,
}

impl Category {
    /// Every category, in canonical order.
    pub const ALL: [Category; 11] = [
        Category::Person,
        Category::Age,
        Category::Drug,
        Category::Strength,
        Category::Frequency,
        Category::Route,
        Category::Duration,
        Category::Form,
        Category::Dosage,
        Category::Diagnosis,
        Category::Condition,
    ];

    /// Lowercase name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Person => "person",
            Category::Age => "age",
            Category::Drug => "drug",
            Category::Strength => "strength",
            Category::Frequency => "frequency",
            Category::Route => "route",
            Category::Duration => "duration",
            Category::Form => "form",
            Category::Dosage => "dosage",
            Category::Diagnosis => "diagnosis",
            Category::Condition => "condition",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == lowered)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// The deduplicated, per-category result of reconciling one note.
///
/// Every category is always present; categories without matches hold an
/// empty set. Values are compared by exact, case-sensitive text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Category, BTreeSet<String>>")]
pub struct EntitySet {
    #[serde(flatten)]
    values: BTreeMap<Category, BTreeSet<String>>,
}

impl EntitySet {
    /// Create an entity set with every category present and empty.
    pub fn new() -> Self {
        Self {
            values: Category::ALL
                .iter()
                .map(|category| (*category, BTreeSet::new()))
                .collect(),
        }
    }

    /// Add a value to a category. Returns `false` if it was already present.
    pub fn insert(&mut self, category: Category, value: impl Into<String>) -> bool {
        self.values.entry(category).or_default().insert(value.into())
    }

    /// Values for a category.
    pub fn get(&self, category: Category) -> &BTreeSet<String> {
        // new() and From both seed every category
        &self.values[&category]
    }

    /// Whether a category contains the exact value.
    pub fn contains(&self, category: Category, value: &str) -> bool {
        self.get(category).contains(value)
    }

    /// Iterate categories in canonical order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &BTreeSet<String>)> {
        self.values.iter().map(|(category, values)| (*category, values))
    }

    /// Total number of values across all categories.
    pub fn total(&self) -> usize {
        self.values.values().map(BTreeSet::len).sum()
    }

    /// Whether no category holds any value.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Default for EntitySet {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<Category, BTreeSet<String>>> for EntitySet {
    fn from(values: BTreeMap<Category, BTreeSet<String>>) -> Self {
        let mut set = EntitySet::new();
        for (category, entries) in values {
            set.values.insert(category, entries);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entity_set_has_every_category() {
        let set = EntitySet::new();
        assert_eq!(set.iter().count(), Category::ALL.len());
        assert!(set.is_empty());
    }

    #[test]
    fn test_insert_is_case_sensitive_and_unique() {
        let mut set = EntitySet::new();
        assert!(set.insert(Category::Drug, "Aspirin"));
        assert!(!set.insert(Category::Drug, "Aspirin"));
        assert!(set.insert(Category::Drug, "aspirin"));
        assert_eq!(set.get(Category::Drug).len(), 2);
    }

    #[test]
    fn test_serializes_all_categories() {
        let mut set = EntitySet::new();
        set.insert(Category::Age, "45");

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["age"], serde_json::json!(["45"]));
        assert_eq!(json["person"], serde_json::json!([]));
        assert_eq!(json.as_object().unwrap().len(), 11);
    }

    #[test]
    fn test_deserialize_fills_missing_categories() {
        let set: EntitySet = serde_json::from_str(r#"{"drug": ["Aspirin"]}"#).unwrap();
        assert!(set.contains(Category::Drug, "Aspirin"));
        assert!(set.get(Category::Condition).is_empty());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("DRUG".parse::<Category>().unwrap(), Category::Drug);
        assert_eq!("Diagnosis".parse::<Category>().unwrap(), Category::Diagnosis);
        assert!("misc".parse::<Category>().is_err());
    }
}
