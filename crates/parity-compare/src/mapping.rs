//! Field name vocabularies and the exclusion set
//!
//! The legacy service names fields in Korean, the new service in English.
//! [`FieldMappingTable`] holds the source -> target table and its derived
//! inverse; [`ExclusionSet`] lists fields whose values come from the RNG.

use std::collections::{BTreeSet, HashMap};
use tracing::warn;

/// Standard Korean -> English field names
pub const STANDARD_FIELD_MAP: &[(&str, &str)] = &[
    // General fields
    ("장수번호", "generalId"),
    ("이름", "name"),
    ("소속국", "nationId"),
    ("소속도시", "cityId"),
    ("통솔", "leadership"),
    ("무력", "strength"),
    ("지력", "intelligence"),
    ("매력", "charm"),
    ("병사수", "crew"),
    ("훈련", "training"),
    ("사기", "morale"),
    ("금", "gold"),
    ("쌀", "rice"),
    ("경험", "experience"),
    ("공헌", "dedication"),
    ("명성", "reputation"),
    ("계급", "rank"),
    ("레벨", "level"),
    ("국가명", "nationName"),
    ("도시명", "cityName"),
    // Nation fields
    ("국번", "nationId"),
    ("수도", "capital"),
    ("국력", "power"),
    ("기술", "tech"),
    // City fields
    ("도시번호", "cityId"),
    ("인구", "population"),
    ("민심", "trust"),
    ("농업", "agriculture"),
    ("상업", "commerce"),
    ("치안", "security"),
    ("수비", "defence"),
    ("성벽", "wall"),
    // Turn/time
    ("턴", "turn"),
    ("년", "year"),
    ("월", "month"),
    // Result
    ("결과", "result"),
    ("이유", "reason"),
];

/// Fields whose values are driven by the battle/turn RNG, in both vocabularies
#[rustfmt::skip]
pub const RNG_DEPENDENT_FIELDS: &[&str] = &[
    "crew", "병사수",
    "training", "훈련",
    "morale", "사기",
    "gold", "금",
    "rice", "쌀",
    "experience", "경험",
    "dedication", "공헌",
    "population", "인구",
    "trust", "민심",
];

/// Which way to translate field names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Source vocabulary to target vocabulary
    #[default]
    Forward,
    /// Target vocabulary back to source vocabulary
    Reverse,
}

/// Immutable lookup between two field-naming vocabularies.
///
/// Two tables are equal when they translate every name the same way in both
/// directions.
#[derive(Debug, Clone, Default)]
pub struct FieldMappingTable {
    /// One pair per source name, in the order their mapping was last set
    pairs: Vec<(String, String)>,
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
}

impl FieldMappingTable {
    /// Build a table from `(source, target)` pairs.
    ///
    /// A source name listed twice keeps its last target. The reverse table is
    /// the inversion of the forward one; when several source names share a
    /// target name, the last of them owns the reverse entry.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut table = Self::default();
        table.extend(pairs);
        table
    }

    /// The built-in Korean -> English table
    pub fn standard() -> Self {
        Self::from_pairs(STANDARD_FIELD_MAP.iter().copied())
    }

    /// A copy of this table with the directions swapped
    pub fn inverted(&self) -> Self {
        let mut owners: Vec<(&String, &String)> = self.reverse.iter().collect();
        owners.sort();
        Self::from_pairs(
            owners
                .into_iter()
                .map(|(target, source)| (target.clone(), source.clone())),
        )
    }

    /// Look up the counterpart of `key`, if the table maps it
    pub fn translate(&self, key: &str, direction: Direction) -> Option<&str> {
        let table = match direction {
            Direction::Forward => &self.forward,
            Direction::Reverse => &self.reverse,
        };
        table.get(key).map(String::as_str)
    }

    /// Number of forward entries
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Every source name whose forward entry is `target`
    pub fn sources_of<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.forward
            .iter()
            .filter(move |(_, t)| t.as_str() == target)
            .map(|(s, _)| s.as_str())
    }

    /// Append pairs, later pairs taking precedence over earlier ones
    pub fn extend<I, S, T>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        for (source, target) in pairs {
            let source = source.into();
            let target = target.into();
            if let Some(previous) = self.forward.insert(source.clone(), target.clone()) {
                if previous != target {
                    warn!(
                        "Field '{}' remapped from '{}' to '{}'",
                        source, previous, target
                    );
                }
            }
            self.pairs.retain(|(existing, _)| *existing != source);
            self.pairs.push((source, target));
        }

        self.reverse.clear();
        for (source, target) in &self.pairs {
            self.reverse.insert(target.clone(), source.clone());
        }
    }
}

impl PartialEq for FieldMappingTable {
    fn eq(&self, other: &Self) -> bool {
        self.forward == other.forward && self.reverse == other.reverse
    }
}

/// Field names whose values are ignored during value comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    fields: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in set of RNG-dependent fields
    pub fn rng_dependent() -> Self {
        RNG_DEPENDENT_FIELDS.iter().copied().collect()
    }

    pub fn insert(&mut self, field: impl Into<String>) {
        self.fields.insert(field.into());
    }

    /// Whether a mapping key is excluded
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// Add the counterparts of every member in both directions of `table`,
    /// so membership holds whichever vocabulary a tree uses.
    pub fn widen(mut self, table: &FieldMappingTable) -> Self {
        let mut counterparts = Vec::new();
        for field in &self.fields {
            if let Some(target) = table.translate(field, Direction::Forward) {
                counterparts.push(target.to_string());
            }
            counterparts.extend(table.sources_of(field).map(str::to_string));
        }
        self.fields.extend(counterparts);
        self
    }

    /// Union of two sets
    pub fn union(&self, other: &ExclusionSet) -> ExclusionSet {
        ExclusionSet {
            fields: self.fields.union(&other.fields).cloned().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(Into::into).collect(),
        }
    }
}
