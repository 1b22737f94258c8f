use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use serde::{Deserialize, Serialize};
use span::{Span, Spanned, NO_SPAN};
use textpos::index_to_position;

use errors::{ConfigError, FileError, PortError};
use types::Rewrite;

/// Get a list of diagnostics from a list of errors
pub fn get_diagnostics(errs: &[Spanned<PortError>], source: &str) -> Vec<Diagnosis> {
    errs.iter()
        .map(|(err, span)| Diagnosis {
            range: get_range(source, span),
            severity: Some(DiagnosisSeverity::ERROR),
            message: err.to_string(),
        })
        .collect()
}

/// Planned rewrites reported as informational diagnostics
pub fn rewrite_diagnostics(rewrites: &[Spanned<Rewrite>], source: &str) -> Vec<Diagnosis> {
    rewrites
        .iter()
        .map(|(rewrite, span)| Diagnosis {
            range: get_range(source, span),
            severity: Some(DiagnosisSeverity::INFORMATION),
            message: format!("{}: {} -> {}", rewrite.rule, rewrite.old, rewrite.new),
        })
        .collect()
}

fn get_range(source: &str, span: &Span) -> DiagnosisRange {
    DiagnosisRange {
        start: get_position(source, span.start),
        end: get_position(source, span.end),
    }
}

fn get_position(source: &str, idx: usize) -> DiagnosisPosition {
    let (line, character) = index_to_position(source, idx);

    DiagnosisPosition {
        line: line as u32,
        character: character as u32,
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub range: DiagnosisRange,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<DiagnosisSeverity>,

    pub message: String,
}

#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DiagnosisSeverity(i32);
impl DiagnosisSeverity {
    pub const ERROR: DiagnosisSeverity = DiagnosisSeverity(1);
    pub const WARNING: DiagnosisSeverity = DiagnosisSeverity(2);
    pub const INFORMATION: DiagnosisSeverity = DiagnosisSeverity(3);
    pub const HINT: DiagnosisSeverity = DiagnosisSeverity(4);
}

#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Default, Deserialize, Serialize)]
pub struct DiagnosisPosition {
    pub line: u32,
    pub character: u32,
}

impl DiagnosisPosition {
    pub fn new(line: u32, character: u32) -> DiagnosisPosition {
        DiagnosisPosition { line, character }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Default, Deserialize, Serialize)]
pub struct DiagnosisRange {
    /// The range's start position (inclusive)
    pub start: DiagnosisPosition,
    /// The range's end position (exclusive)
    pub end: DiagnosisPosition,
}

impl DiagnosisRange {
    pub fn new(start: DiagnosisPosition, end: DiagnosisPosition) -> DiagnosisRange {
        DiagnosisRange { start, end }
    }
}

pub trait AsDiagnostic {
    fn as_diagnostic(&self, span: &Span) -> Diagnostic<()>;
}

macro_rules! impl_as_diagnostic {
    ($($error:tt),+) => {$(
        impl AsDiagnostic for $error {
            fn as_diagnostic(&self, span: &Span) -> Diagnostic<()> {
                let diagnostic = Diagnostic::error()
                    .with_code(stringify!($error))
                    .with_message(self.to_string());

                // errors with no location keep the plain message
                if span == &NO_SPAN {
                    diagnostic
                } else {
                    diagnostic.with_labels(vec![Label::primary((), span.clone())])
                }
            }
        }
    )+};
}

impl_as_diagnostic!(ConfigError, FileError);

impl AsDiagnostic for PortError {
    fn as_diagnostic(&self, span: &Span) -> Diagnostic<()> {
        match self {
            PortError::ConfigError(e) => e.as_diagnostic(span),
            PortError::FileError(e) => e.as_diagnostic(span),
        }
    }
}

impl AsDiagnostic for Rewrite {
    fn as_diagnostic(&self, span: &Span) -> Diagnostic<()> {
        Diagnostic::note()
            .with_message(format!("{}: {} -> {}", self.rule, self.old, self.new))
            .with_labels(vec![Label::primary((), span.clone())])
    }
}

/// Print errors to stderr, with the offending source labeled when the error
/// has a location.
pub fn emit_to_stderr(errs: &[Spanned<PortError>], name: &str, source: &str) {
    let file = SimpleFile::new(name, source);
    let writer = StandardStream::stderr(ColorChoice::Auto);
    let config = term::Config::default();

    for (err, span) in errs {
        let diagnostic = err.as_diagnostic(span);
        let _ = term::emit(&mut writer.lock(), &config, &file, &diagnostic);
    }
}

/// Print planned rewrites to stdout with the old text labeled in context.
pub fn print_rewrites(rewrites: &[Spanned<Rewrite>], name: &str, source: &str) {
    let file = SimpleFile::new(name, source);
    let writer = StandardStream::stdout(ColorChoice::Auto);
    let config = term::Config::default();

    for (rewrite, span) in rewrites {
        let diagnostic = rewrite.as_diagnostic(span);
        let _ = term::emit(&mut writer.lock(), &config, &file, &diagnostic);
    }
}
