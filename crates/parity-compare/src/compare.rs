//! Response comparison between the reference and candidate services

use crate::coerce::coerce_types;
use crate::mapping::{Direction, ExclusionSet};
use crate::normalize::normalize_keys;
use crate::policy::ComparePolicy;
use crate::shape::{structural_shape, Shape};
use crate::value::ValueKind;
use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace};

/// Result of comparing two responses
#[derive(Debug, Clone)]
pub struct DiffResult {
    /// Overall verdict
    pub equal: bool,
    /// Whether both trees have the same shape, computed in every mode
    pub structural_match: bool,
    /// Every difference found; only set when a full comparison found any
    pub diff: Option<Vec<Difference>>,
    pub reference_shape: Shape,
    pub candidate_shape: Shape,
}

impl DiffResult {
    /// Differences found, empty when equal or structural-only
    pub fn differences(&self) -> &[Difference] {
        self.diff.as_deref().unwrap_or_default()
    }

    /// One line per difference, or both shapes when only the structure was checked
    pub fn details(&self) -> String {
        if let Some(diff) = &self.diff {
            return diff
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
        }
        if !self.structural_match {
            return format!(
                "shape mismatch\nreference: {}\ncandidate: {}",
                self.reference_shape, self.candidate_shape
            );
        }
        String::new()
    }
}

/// A specific difference between responses
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    pub category: DiffCategory,
    pub path: String,
    pub reference: Option<Value>,
    pub candidate: Option<Value>,
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |value: &Option<Value>| match value {
            Some(value) => value.to_string(),
            None => "(missing)".to_string(),
        };
        let path = if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        };
        write!(
            f,
            "[{:>12}] {} : reference={} candidate={}",
            self.category,
            path,
            show(&self.reference),
            show(&self.candidate)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffCategory {
    /// Same kind, different value
    Value,
    /// Different kinds at the same path
    Type,
    /// Key present only in the reference
    Missing,
    /// Key present only in the candidate
    Extra,
    /// Sequence element with no counterpart in the candidate
    ItemMissing,
    /// Sequence element with no counterpart in the reference
    ItemExtra,
}

impl fmt::Display for DiffCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            DiffCategory::Value => "VALUE",
            DiffCategory::Type => "TYPE",
            DiffCategory::Missing => "MISSING",
            DiffCategory::Extra => "EXTRA",
            DiffCategory::ItemMissing => "ITEM_MISSING",
            DiffCategory::ItemExtra => "ITEM_EXTRA",
        })
    }
}

/// Options for a single comparison
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Only compare shapes, never values
    pub structural_only: bool,
    /// Translate and coerce the reference tree, coerce the candidate tree
    pub normalize: bool,
    /// Which way the policy's field table is applied to the reference
    pub direction: Direction,
    /// Fields ignored on top of the policy's exclusion set
    pub ignore_fields: HashSet<String>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            structural_only: false,
            normalize: true,
            direction: Direction::Forward,
            ignore_fields: HashSet::new(),
        }
    }
}

impl CompareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structural_only(mut self) -> Self {
        self.structural_only = true;
        self
    }

    pub fn without_normalization(mut self) -> Self {
        self.normalize = false;
        self
    }

    /// Translate the reference from target vocabulary back to source vocabulary
    pub fn reversed(mut self) -> Self {
        self.direction = Direction::Reverse;
        self
    }

    pub fn ignore_field(mut self, field: &str) -> Self {
        self.ignore_fields.insert(field.to_string());
        self
    }

    pub fn ignore_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_fields.extend(fields.into_iter().map(Into::into));
        self
    }
}

/// Compare a reference response against a candidate response
pub fn compare_responses(
    reference: &Value,
    candidate: &Value,
    options: &CompareOptions,
    policy: &ComparePolicy,
) -> DiffResult {
    let (reference, candidate): (Cow<'_, Value>, Cow<'_, Value>) = if options.normalize {
        let translated = normalize_keys(reference, &policy.fields, options.direction);
        (
            Cow::Owned(coerce_types(&translated)),
            Cow::Owned(coerce_types(candidate)),
        )
    } else {
        (Cow::Borrowed(reference), Cow::Borrowed(candidate))
    };

    let reference_shape = structural_shape(&reference);
    let candidate_shape = structural_shape(&candidate);
    let structural_match = reference_shape == candidate_shape;

    if options.structural_only {
        debug!("Structural comparison: match={}", structural_match);
        return DiffResult {
            equal: structural_match,
            structural_match,
            diff: None,
            reference_shape,
            candidate_shape,
        };
    }

    // The reference is already renamed, so names must match in both vocabularies
    let ignored: ExclusionSet = options.ignore_fields.iter().map(String::as_str).collect();
    let differ = Differ {
        exclusions: policy.exclusions.union(&ignored).widen(&policy.fields),
        significant_digits: policy.significant_digits,
    };
    let mut differences = Vec::new();
    differ.diff("", &reference, &candidate, &mut differences);

    debug!(
        "Value comparison: {} differences, structural_match={}",
        differences.len(),
        structural_match
    );

    DiffResult {
        equal: differences.is_empty(),
        structural_match,
        diff: (!differences.is_empty()).then_some(differences),
        reference_shape,
        candidate_shape,
    }
}

/// Tolerant, order-insensitive tree comparison.
///
/// Sequences are matched as multisets with first-fit removal: every reference
/// element takes the first unused equivalent candidate element. This is not a
/// maximum matching: with partially overlapping duplicates it can report a
/// difference even though a complete pairing exists.
struct Differ {
    exclusions: ExclusionSet,
    significant_digits: Option<u32>,
}

impl Differ {
    fn is_excluded(&self, key: &str) -> bool {
        self.exclusions.contains(key)
    }

    fn diff(&self, path: &str, reference: &Value, candidate: &Value, out: &mut Vec<Difference>) {
        match (reference, candidate) {
            (Value::Object(ref_map), Value::Object(cand_map)) => {
                self.diff_mappings(path, ref_map, cand_map, out)
            }
            (Value::Array(ref_items), Value::Array(cand_items)) => {
                self.diff_sequences(path, ref_items, cand_items, out)
            }
            _ => {
                let ref_kind = ValueKind::of(reference);
                let cand_kind = ValueKind::of(candidate);
                let category = if ref_kind == cand_kind {
                    DiffCategory::Value
                } else {
                    DiffCategory::Type
                };
                if !self.scalars_match(reference, candidate) {
                    trace!("{} at '{}'", category, path);
                    out.push(Difference {
                        category,
                        path: path.to_string(),
                        reference: Some(reference.clone()),
                        candidate: Some(candidate.clone()),
                    });
                }
            }
        }
    }

    fn diff_mappings(
        &self,
        path: &str,
        reference: &Map<String, Value>,
        candidate: &Map<String, Value>,
        out: &mut Vec<Difference>,
    ) {
        for (key, ref_value) in reference {
            if self.is_excluded(key) {
                continue;
            }
            let child_path = join_key(path, key);
            match candidate.get(key) {
                Some(cand_value) => self.diff(&child_path, ref_value, cand_value, out),
                None => out.push(Difference {
                    category: DiffCategory::Missing,
                    path: child_path,
                    reference: Some(ref_value.clone()),
                    candidate: None,
                }),
            }
        }

        for (key, cand_value) in candidate {
            if reference.contains_key(key) || self.is_excluded(key) {
                continue;
            }
            out.push(Difference {
                category: DiffCategory::Extra,
                path: join_key(path, key),
                reference: None,
                candidate: Some(cand_value.clone()),
            });
        }
    }

    fn diff_sequences(
        &self,
        path: &str,
        reference: &[Value],
        candidate: &[Value],
        out: &mut Vec<Difference>,
    ) {
        let (unmatched_ref, unmatched_cand) = self.match_sequences(reference, candidate);

        // Leftovers are paired in order so a changed element reports what changed
        // inside it rather than a removal plus an addition.
        let paired = unmatched_ref.len().min(unmatched_cand.len());
        for (&i, &j) in unmatched_ref.iter().zip(&unmatched_cand) {
            self.diff(&join_index(path, i), &reference[i], &candidate[j], out);
        }
        for &i in &unmatched_ref[paired..] {
            out.push(Difference {
                category: DiffCategory::ItemMissing,
                path: join_index(path, i),
                reference: Some(reference[i].clone()),
                candidate: None,
            });
        }
        for &j in &unmatched_cand[paired..] {
            out.push(Difference {
                category: DiffCategory::ItemExtra,
                path: join_index(path, j),
                reference: None,
                candidate: Some(candidate[j].clone()),
            });
        }
    }

    /// First-fit multiset matching; returns the unmatched indices of each side
    fn match_sequences(
        &self,
        reference: &[Value],
        candidate: &[Value],
    ) -> (Vec<usize>, Vec<usize>) {
        let mut used = vec![false; candidate.len()];
        let mut unmatched_ref = Vec::new();

        for (i, ref_item) in reference.iter().enumerate() {
            let found = candidate
                .iter()
                .enumerate()
                .position(|(j, cand_item)| !used[j] && self.equivalent(ref_item, cand_item));
            match found {
                Some(j) => used[j] = true,
                None => unmatched_ref.push(i),
            }
        }

        let unmatched_cand = (0..candidate.len()).filter(|&j| !used[j]).collect();
        (unmatched_ref, unmatched_cand)
    }

    /// Whether two trees compare equal under this policy
    fn equivalent(&self, reference: &Value, candidate: &Value) -> bool {
        match (reference, candidate) {
            (Value::Object(ref_map), Value::Object(cand_map)) => {
                let keys_covered = cand_map
                    .keys()
                    .all(|key| ref_map.contains_key(key) || self.is_excluded(key));
                keys_covered
                    && ref_map.iter().all(|(key, ref_value)| {
                        self.is_excluded(key)
                            || cand_map
                                .get(key)
                                .is_some_and(|cand_value| self.equivalent(ref_value, cand_value))
                    })
            }
            (Value::Array(ref_items), Value::Array(cand_items)) => {
                ref_items.len() == cand_items.len() && {
                    let (unmatched_ref, _) = self.match_sequences(ref_items, cand_items);
                    unmatched_ref.is_empty()
                }
            }
            _ => self.scalars_match(reference, candidate),
        }
    }

    fn scalars_match(&self, reference: &Value, candidate: &Value) -> bool {
        match (reference, candidate) {
            (Value::Number(a), Value::Number(b)) => {
                numbers_match(a, b, self.significant_digits)
            }
            _ => reference == candidate,
        }
    }
}

/// Compare two numbers, rounding both to `digits` decimal places when set.
///
/// An integer never matches a float, whatever their values.
fn numbers_match(a: &Number, b: &Number, digits: Option<u32>) -> bool {
    if a.is_f64() != b.is_f64() {
        return false;
    }
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => match digits {
            Some(digits) => round_repr(x, digits) == round_repr(y, digits),
            None => x == y,
        },
        _ => false,
    }
}

/// Fixed-point rendering used for tolerant comparison, with `-0` folded into `0`
fn round_repr(value: f64, digits: u32) -> String {
    let repr = format!("{:.*}", digits as usize, value);
    match repr.strip_prefix('-') {
        Some(unsigned) if unsigned.bytes().all(|b| b == b'0' || b == b'.') => {
            unsigned.to_string()
        }
        _ => repr,
    }
}

fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn join_index(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}
