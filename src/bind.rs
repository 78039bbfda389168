//! # Parameter Binding Bridge
//!
//! Seam between the value layer and prepared-statement-like consumers: a
//! driver bridge implements [`ParamSink`], and each value kind writes itself
//! through the type-specific method via [`TypedValue::bind`]. The value
//! layer never sees the wire protocol behind the sink.
//!
//! [`TypedValue::bind`]: crate::TypedValue::bind

use eyre::Result;

/// A prepared-statement-like sink accepting positional parameters.
///
/// Indexes are zero-based. Implementations report their own failures (wire
/// errors, closed statements); the value layer propagates them unchanged.
pub trait ParamSink {
    /// Binds a text parameter at `index`.
    fn bind_text(&mut self, index: usize, text: &str) -> Result<()>;

    /// Binds SQL NULL at `index`.
    fn bind_null(&mut self, index: usize) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ValueContext;
    use crate::types::{StrValue, TypedValue};

    #[derive(Default)]
    struct RecordingSink {
        bound: Vec<(usize, Option<String>)>,
    }

    impl ParamSink for RecordingSink {
        fn bind_text(&mut self, index: usize, text: &str) -> Result<()> {
            self.bound.push((index, Some(text.to_string())));
            Ok(())
        }

        fn bind_null(&mut self, index: usize) -> Result<()> {
            self.bound.push((index, None));
            Ok(())
        }
    }

    #[test]
    fn test_string_value_binds_as_text() {
        let ctx = ValueContext::with_defaults();
        let value = StrValue::varchar(&ctx, "bound-payload");
        let mut sink = RecordingSink::default();

        value.bind(&mut sink, 2).unwrap();

        assert_eq!(sink.bound, vec![(2, Some("bound-payload".to_string()))]);
    }

    #[test]
    fn test_sink_errors_propagate() {
        struct FailingSink;
        impl ParamSink for FailingSink {
            fn bind_text(&mut self, _index: usize, _text: &str) -> Result<()> {
                eyre::bail!("statement closed")
            }
            fn bind_null(&mut self, _index: usize) -> Result<()> {
                eyre::bail!("statement closed")
            }
        }

        let ctx = ValueContext::with_defaults();
        let value = StrValue::varchar(&ctx, "x");
        let err = value.bind(&mut FailingSink, 0);
        assert!(err.is_err());
        assert!(err.unwrap_err().to_string().contains("statement closed"));
    }
}
