use swc_core::common::{SourceMap, Span};
use thiserror::Error;

/// A single failure while rewriting css-module imports or classnames.
///
/// The span of the offending node travels with the error so that callers
/// holding a source map can render a `line:column` suffix.
#[derive(Debug, Error)]
#[error("CSSModuleError: {kind}")]
pub struct CssModuleError {
  pub kind: CssModuleErrorKind,
  pub span: Span,
}

impl CssModuleError {
  pub fn new(kind: CssModuleErrorKind, span: Span) -> Self {
    CssModuleError { kind, span }
  }

  /// Formats the error with the location of the offending node, e.g.
  /// `CSSModuleError: css-module 'm1' has already been declared (at 3:12)`.
  pub fn to_diagnostic_string(&self, source_map: &SourceMap) -> String {
    let loc = SourceLocation::from(source_map, self.span);
    format!("{} (at {}:{})", self, loc.start_line, loc.start_col)
  }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CssModuleErrorKind {
  #[error("import the css-module as a default import on '{import_source}'")]
  NonDefaultImport { import_source: String },
  #[error("more than one import found on '{import_source}'")]
  MultipleSpecifiers { import_source: String },
  #[error("only one default css-module import is allowed; label every module except the default one")]
  DuplicateDefaultModule,
  #[error("css-module '{label}' has already been declared")]
  DuplicateLabel { label: String },
  #[error("malformed class token '{token}'")]
  MalformedToken { token: String },
  #[error("css-module '{label}' on class '{class}' was never imported")]
  UnknownLabel { label: String, class: String },
  #[error("class '{class}' has no module to resolve against; no default css-module in this file")]
  NoDefaultModule { class: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
  pub start_line: usize,
  pub start_col: usize,
  pub end_line: usize,
  pub end_col: usize,
}

impl SourceLocation {
  pub fn from(source_map: &SourceMap, span: Span) -> SourceLocation {
    if span.lo.is_dummy() || span.hi.is_dummy() {
      return SourceLocation {
        start_line: 1,
        start_col: 1,
        end_line: 1,
        end_col: 2,
      };
    }

    let start = source_map.lookup_char_pos(span.lo);
    let end = source_map.lookup_char_pos(span.hi);
    // SWC columns are 0-based
    SourceLocation {
      start_line: start.line,
      start_col: start.col_display + 1,
      end_line: end.line,
      end_col: end.col_display + 1,
    }
  }
}
