//! # Character-String Values
//!
//! This module provides `StrValue`, the concrete character-string value and
//! the representative case for the typed-value contract. One struct backs
//! three concrete kinds, selected by [`TextKind`]:
//!
//! | Flavor | Kind tag | Ordering |
//! |--------|----------|----------|
//! | `Varchar` | `ValueKind::Varchar` | exact |
//! | `Char` | `ValueKind::Char` | exact |
//! | `VarcharIgnoreCase` | `ValueKind::VarcharIgnoreCase` | case-folded |
//!
//! The payload is an `Arc<str>`: immutable, and free to share between the
//! cache, indexes, and result sets. Derivation operations (truncation)
//! preserve the flavor of the value they derive from, so a `Char` truncates
//! to a `Char`.
//!
//! ## Construction
//!
//! Construction is never direct; [`StrValue::get`] is the factory:
//!
//! 1. empty input returns the per-flavor shared empty singleton
//! 2. the payload is interned through the raw-text intern table
//! 3. payloads over the cache-eligibility threshold bypass the value cache
//! 4. everything else is canonicalized through the value cache
//!
//! Repeated calls with equal content therefore return content-equal values,
//! usually sharing one payload allocation, but callers must not assume
//! same-object identity: cache eviction can recreate a canonical instance.

use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};

use eyre::Result;

use super::compare::CompareMode;
use super::kind::ValueKind;
use super::typed_value::{precision_to_len, TypedValue};
use crate::bind::ParamSink;
use crate::config::{BYTES_PER_CHAR, VALUE_OBJECT_OVERHEAD};
use crate::context::ValueContext;

/// Closed set of character-string flavors.
///
/// Each flavor is a distinct concrete kind: values of different flavors are
/// never equal, even with identical payloads. Behavior that varies per
/// flavor dispatches statically over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    Varchar,
    Char,
    VarcharIgnoreCase,
}

impl TextKind {
    /// The kind tag this flavor presents through the typed-value contract.
    pub fn value_kind(self) -> ValueKind {
        match self {
            TextKind::Varchar => ValueKind::Varchar,
            TextKind::Char => ValueKind::Char,
            TextKind::VarcharIgnoreCase => ValueKind::VarcharIgnoreCase,
        }
    }
}

/// Immutable character-string value.
///
/// Equality is exact payload content plus flavor; the case-insensitive
/// flavor folds case only under [`TypedValue::compare_secure`], keeping
/// `Eq` and `Hash` consistent and locale-independent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StrValue {
    kind: TextKind,
    text: Arc<str>,
}

impl StrValue {
    /// Get or create a string value for the given content.
    ///
    /// Canonicalizes through the context's intern table and value cache; see
    /// the module docs for the exact path. The returned value is content-
    /// equal to `s` but not guaranteed to be the same object on repeated
    /// calls.
    pub fn get(ctx: &ValueContext, kind: TextKind, s: &str) -> StrValue {
        if s.is_empty() {
            return Self::empty(kind);
        }
        let text = ctx.interner().intern(s);
        let value = StrValue { kind, text };
        if s.len() > ctx.config().max_cached_element_bytes {
            return value;
        }
        ctx.cache().intern_or_register(value)
    }

    /// Shorthand for the common VARCHAR flavor.
    pub fn varchar(ctx: &ValueContext, s: &str) -> StrValue {
        Self::get(ctx, TextKind::Varchar, s)
    }

    /// The shared zero-length value for a flavor. Never separately
    /// allocated: every empty value of a flavor is this one.
    pub fn empty(kind: TextKind) -> StrValue {
        static EMPTY_VARCHAR: OnceLock<StrValue> = OnceLock::new();
        static EMPTY_CHAR: OnceLock<StrValue> = OnceLock::new();
        static EMPTY_IGNORECASE: OnceLock<StrValue> = OnceLock::new();

        let cell = match kind {
            TextKind::Varchar => &EMPTY_VARCHAR,
            TextKind::Char => &EMPTY_CHAR,
            TextKind::VarcharIgnoreCase => &EMPTY_IGNORECASE,
        };
        cell.get_or_init(|| StrValue {
            kind,
            text: Arc::from(""),
        })
        .clone()
    }

    /// This value's flavor.
    pub fn text_kind(&self) -> TextKind {
        self.kind
    }

    /// True when both values share one payload allocation. Content equality
    /// does not require this; the empty singleton and cache hits provide it.
    pub fn shares_payload(&self, other: &StrValue) -> bool {
        Arc::ptr_eq(&self.text, &other.text)
    }

    /// Derive a new value of this flavor from transformed content.
    /// Does not consult the cache: derived values are canonicalized only if
    /// the caller routes them back through [`StrValue::get`].
    fn derive_from_text(&self, s: &str) -> StrValue {
        StrValue {
            kind: self.kind,
            text: Arc::from(s),
        }
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

impl TypedValue for StrValue {
    fn kind(&self) -> ValueKind {
        self.kind.value_kind()
    }

    fn to_text(&self) -> &str {
        &self.text
    }

    fn sql_literal(&self) -> String {
        quote_text_literal(&self.text)
    }

    fn precision(&self) -> u64 {
        self.char_count() as u64
    }

    fn display_size(&self) -> usize {
        self.char_count()
    }

    fn memory_size(&self) -> usize {
        self.char_count() * BYTES_PER_CHAR + VALUE_OBJECT_OVERHEAD
    }

    fn convert_precision(&self, target: u64, _force: bool) -> Result<Self> {
        if target == 0 || self.char_count() as u64 <= target {
            return Ok(self.clone());
        }
        let len = precision_to_len(target)?;
        let cut: String = self.text.chars().take(len).collect();
        Ok(self.derive_from_text(&cut))
    }

    fn compare_secure(&self, other: &Self, mode: &CompareMode) -> Ordering {
        let fold = self.kind == TextKind::VarcharIgnoreCase;
        mode.compare_text(&self.text, &other.text, fold)
    }

    fn bind(&self, sink: &mut dyn ParamSink, index: usize) -> Result<()> {
        sink.bind_text(index, &self.text)
    }
}

/// Quotes text as a SQL string literal: wrapped in single quotes, embedded
/// single quotes doubled. The output is consumed verbatim by SQL-text
/// reconstruction and must re-parse to the original content.
pub fn quote_text_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}
