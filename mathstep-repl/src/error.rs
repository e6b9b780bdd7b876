use ariadne::Source;
use mathstep_error::Error as ParseError;

/// Utility enum to package errors that can occur while running a command.
#[derive(Debug)]
pub enum Error {
    /// An expression given to the command could not be parsed. The source is the text of that
    /// expression alone, which the spans of the error point into.
    ParseError(ParseError, String),

    /// The command itself is malformed.
    Usage(String),
}

impl Error {
    /// Report this error to stderr.
    pub fn report_to_stderr(&self) {
        match self {
            Self::ParseError(err, source) => {
                let report = err.build_report("input");
                if let Err(io_err) = report.eprint(("input", Source::from(source))) {
                    eprintln!("{}", io_err);
                }
            },
            Self::Usage(message) => eprintln!("error: {}", message),
        }
    }
}

impl From<(ParseError, &str)> for Error {
    fn from((err, source): (ParseError, &str)) -> Self {
        Self::ParseError(err, source.to_string())
    }
}
