//! Parity comparison engine
//!
//! This crate compares responses from the legacy game server against the new
//! one to check behavioral parity. The two services name fields differently
//! (Korean vs. English), type primitives differently (the legacy side sends
//! numbers as text), and some values are RNG-driven, so plain equality is
//! useless.
//!
//! # Pipeline
//!
//! ```text
//!  reference ─► normalize_keys ─► coerce_types ─┐
//!                                               ├─► structural_shape ─► structural_match
//!  candidate ─────────────────► coerce_types ───┤
//!                                               └─► tolerant diff ─► DiffResult
//! ```
//!
//! Every stage is a pure function over `serde_json::Value`; the field table,
//! exclusions and numeric tolerance travel in an explicit [`ComparePolicy`].
//!
//! # Example
//!
//! ```
//! use parity_compare::{compare_responses, CompareOptions, ComparePolicy};
//! use serde_json::json;
//!
//! let result = compare_responses(
//!     &json!({"통솔": "87", "병사수": "1200"}),
//!     &json!({"leadership": 87, "crew": 950}),
//!     &CompareOptions::new(),
//!     &ComparePolicy::rng_tolerant(),
//! );
//! assert!(result.equal);
//! ```

pub mod coerce;
pub mod compare;
pub mod config;
mod error;
pub mod harness;
pub mod mapping;
pub mod normalize;
pub mod policy;
pub mod report;
pub mod shape;
pub mod value;

pub use coerce::coerce_types;
pub use compare::{compare_responses, CompareOptions, DiffCategory, DiffResult, Difference};
pub use config::{load_policy, load_policy_str, ComparisonConfig, PolicyFile};
pub use error::{ConfigError, ConfigResult};
pub use harness::ParityRun;
pub use mapping::{Direction, ExclusionSet, FieldMappingTable};
pub use normalize::normalize_keys;
pub use policy::ComparePolicy;
pub use report::{format_report, TestOutcome};
pub use shape::{structural_shape, Shape};
pub use value::{Scalar, ValueKind};
