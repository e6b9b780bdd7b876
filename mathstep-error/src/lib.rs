//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, along with the [`Error`] type that pairs an error kind with the source regions it
//! points at.

#[cfg(test)]
extern crate self as mathstep_error;

use ariadne::{Color, Report, Source};
use std::{fmt::Debug, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the rendered report for this error into the given writer.
    pub fn write_report(&self, src_id: &str, input: &str, w: impl io::Write) -> io::Result<()> {
        self.build_report(src_id).write((src_id, Source::from(input)), w)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

#[cfg(test)]
mod tests {
    use ariadne::Fmt;
    use mathstep_attrs::ErrorKind;
    use pretty_assertions::assert_eq;
    use super::*;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "missing operand",
        labels = [format!("add an {} here", "expression".fg(EXPR))],
        help = "every operator needs something on both sides",
    )]
    struct MissingOperand;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("unknown symbol `{}`", symbol),
        labels = ["here", ""],
    )]
    struct UnknownSymbol {
        symbol: char,
    }

    /// Renders the error into a plain string, without the ANSI color codes.
    fn render(err: &Error, input: &str) -> String {
        let mut buf = Vec::new();
        err.write_report("input", input, &mut buf).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn report_contains_message_and_label() {
        let err = Error::new(vec![3..4], MissingOperand);
        let report = render(&err, "2 +");

        assert!(report.contains("missing operand"));
        assert!(report.contains("add an expression here"));
        assert!(report.contains("every operator needs something on both sides"));
    }

    #[test]
    fn report_uses_fields() {
        let err = Error::new(vec![2..3, 0..1], UnknownSymbol { symbol: '$' });
        let report = render(&err, "x $ y");

        assert!(report.contains("unknown symbol `$`"));
        assert_eq!(report.matches("here").count(), 1);
    }
}
