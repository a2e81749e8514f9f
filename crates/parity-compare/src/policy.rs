//! Comparison policy: vocabulary, exclusions and numeric tolerance

use crate::mapping::{ExclusionSet, FieldMappingTable};

/// Default numeric tolerance, in digits after the decimal point
pub const DEFAULT_SIGNIFICANT_DIGITS: u32 = 2;

/// Everything a comparison needs to know about the two systems being compared.
///
/// Policies are plain values; suites that need a different vocabulary or a
/// different set of RNG fields build their own and pass it in.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparePolicy {
    /// Source -> target field names, applied to the reference tree
    pub fields: FieldMappingTable,
    /// Fields ignored during value comparison, at any depth
    pub exclusions: ExclusionSet,
    /// Digits after the decimal point numbers must agree to; `None` is exact
    pub significant_digits: Option<u32>,
}

impl Default for ComparePolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl ComparePolicy {
    /// Standard Korean -> English vocabulary, no exclusions, 2-digit tolerance
    pub fn standard() -> Self {
        Self {
            fields: FieldMappingTable::standard(),
            exclusions: ExclusionSet::new(),
            significant_digits: Some(DEFAULT_SIGNIFICANT_DIGITS),
        }
    }

    /// Standard policy that also ignores the RNG-dependent fields
    pub fn rng_tolerant() -> Self {
        Self::standard().with_exclusions(ExclusionSet::rng_dependent())
    }

    pub fn with_fields(mut self, fields: FieldMappingTable) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_significant_digits(mut self, digits: Option<u32>) -> Self {
        self.significant_digits = digits;
        self
    }

    /// Require numbers to match exactly
    pub fn exact(self) -> Self {
        self.with_significant_digits(None)
    }
}
