//! # Typed Values
//!
//! The value type system: the kind tags, the contract every concrete kind
//! implements, the pluggable comparison mode, and the character-string
//! concrete implementation.
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `ValueKind` | Single-byte kind tag, closed set |
//! | `TypedValue` | Contract: text form, SQL literal, precision, memory, comparison |
//! | `CompareMode` | Collation seam for text ordering |
//! | `StrValue` / `TextKind` | Character-string values in three flavors |
//!
//! ## Usage
//!
//! ```ignore
//! use opaldb_values::{StrValue, TypedValue, ValueContext};
//!
//! let ctx = ValueContext::with_defaults();
//! let name = StrValue::varchar(&ctx, "it's");
//! assert_eq!(name.sql_literal(), "'it''s'");
//! ```

mod compare;
mod kind;
mod string_value;
mod typed_value;

pub use compare::CompareMode;
pub use kind::ValueKind;
pub use string_value::{quote_text_literal, StrValue, TextKind};
pub use typed_value::{precision_to_len, TypedValue};
