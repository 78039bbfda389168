//! # The Typed-Value Contract
//!
//! Every concrete value kind implements [`TypedValue`]. The contract is what
//! lets comparators, the SQL emitter, and the parameter-binding bridge
//! manipulate column values polymorphically while each kind keeps control of
//! its own comparison, display, truncation, and memory-accounting rules.
//!
//! ## Immutability
//!
//! Values are immutable once constructed: no operation on this trait mutates
//! the receiver. Transformations like [`TypedValue::convert_precision`]
//! return a new instance (or a cheap clone sharing the payload when nothing
//! changes). Immutable values are safe to share across concurrent readers
//! without synchronization once published.
//!
//! ## Equality and Hashing
//!
//! The `Eq`/`Hash` bounds carry the cache-key contract: equality is content
//! equality restricted to the same concrete kind, comparing against a
//! different kind is `false` (never an error), and equal content always
//! yields an equal hash.

use std::cmp::Ordering;
use std::hash::Hash;

use eyre::{bail, Result};

use super::compare::CompareMode;
use super::kind::ValueKind;
use crate::bind::ParamSink;

/// Contract every concrete value kind must satisfy.
///
/// Implementations are closed-set: the engine dispatches statically over the
/// known kinds rather than through trait objects, so the trait does not need
/// to be object safe.
pub trait TypedValue: Clone + Eq + Hash {
    /// Fixed kind tag, set at construction. No side effects, never fails.
    fn kind(&self) -> ValueKind;

    /// Canonical external string form of the content. Not necessarily the
    /// SQL literal form; see [`TypedValue::sql_literal`] for that.
    fn to_text(&self) -> &str;

    /// A syntactically valid SQL literal reproducing this value, safe to
    /// re-parse. Content requiring quoting or escaping is escaped.
    fn sql_literal(&self) -> String;

    /// Type-defined logical size. For text this is the character count.
    fn precision(&self) -> u64;

    /// Rendering width hint for result formatting.
    fn display_size(&self) -> usize;

    /// Estimated heap footprint in bytes. Deterministic function of content
    /// size, not a measurement; consumed by memory-budgeted eviction.
    fn memory_size(&self) -> usize;

    /// Returns a value holding at most the first `target` units of content.
    ///
    /// `target == 0` means unbounded; in that case, or when the value
    /// already fits, the result shares the payload with `self` and no new
    /// content is allocated. Otherwise the tail is silently cut: this is
    /// lossy truncation, not validation, and overflow is never an error.
    ///
    /// `force` is reserved and currently ignored.
    ///
    /// The only failure is a `target` too large to represent as a bounded
    /// truncation length (see [`precision_to_len`]).
    fn convert_precision(&self, target: u64, force: bool) -> Result<Self>;

    /// Total-order comparison used by sort and index code. Collation rules
    /// are delegated to `mode` so they stay decoupled from the value type.
    ///
    /// The caller guarantees `other` is comparison-compatible with `self`;
    /// that is a programming contract, not a runtime condition.
    fn compare_secure(&self, other: &Self, mode: &CompareMode) -> Ordering;

    /// Writes this value into a prepared-statement-like sink as the
    /// parameter at `index`. Sink errors propagate unchanged.
    fn bind(&self, sink: &mut dyn ParamSink, index: usize) -> Result<()>;
}

/// Converts a 64-bit precision request into a bounded truncation length.
///
/// Truncation lengths are limited to the 32-bit range shared with column
/// definitions. A request beyond that range is an out-of-range error that
/// must propagate to the caller; clamping here would silently corrupt
/// truncation semantics downstream.
pub fn precision_to_len(precision: u64) -> Result<usize> {
    if precision > u32::MAX as u64 {
        bail!("precision {} out of range for a truncation length", precision);
    }
    Ok(precision as usize)
}
