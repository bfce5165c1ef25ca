use regex::Regex;
use swc_core::atoms::Atom;
use swc_core::common::Span;

use crate::error::{CssModuleError, CssModuleErrorKind};

/// Reserved delimiter between a label and a module path or classname.
pub const DELIMITER: char = ':';

/// Reserved label meaning "leave this class alone".
pub const GLOBAL_LABEL: &str = "g";

thread_local! {
  static RE_MODULE_STYLE_SHEET: Regex = Regex::new(r"(?i)\.module\.(s[ac]ss|css)$").unwrap();
}

/// True when `path` names a css/scss/sass module style-sheet.
pub fn is_module_style_sheet(path: &str) -> bool {
  RE_MODULE_STYLE_SHEET.with(|re| re.is_match(path))
}

/// One import source, split into the real module path and the optional
/// label prefix (`"m1:./a.module.css"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDirective {
  pub module_path: String,
  pub label: Option<Atom>,
}

/// Splits an import source at the first delimiter. Never fails; an empty
/// label is passed through and treated as "no label" by the caller.
pub fn split_module_source(source: &str) -> ImportDirective {
  match source.split_once(DELIMITER) {
    Some((label, path)) => ImportDirective {
      module_path: path.to_string(),
      label: Some(label.into()),
    },
    None => ImportDirective {
      module_path: source.to_string(),
      label: None,
    },
  }
}

/// One whitespace-delimited word of a class attribute string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassToken {
  /// Bare classname, resolved against the default module.
  Default { class: Atom },
  /// `label:classname`, resolved against the named modules.
  Labeled { label: Atom, class: Atom },
  /// Tagged with the global marker (`classname:g`), emitted verbatim.
  Global { class: Atom },
}

/// Splits one class token at the first delimiter.
///
/// An empty segment on either side of the delimiter is malformed. The
/// global marker wins over a module that happens to be labeled `g`.
pub fn split_class_token(token: &str, span: Span) -> Result<ClassToken, CssModuleError> {
  let Some((lhs, rhs)) = token.split_once(DELIMITER) else {
    return Ok(ClassToken::Default {
      class: token.into(),
    });
  };

  if lhs.is_empty() || rhs.is_empty() {
    return Err(CssModuleError::new(
      CssModuleErrorKind::MalformedToken {
        token: token.to_string(),
      },
      span,
    ));
  }

  if rhs == GLOBAL_LABEL {
    return Ok(ClassToken::Global { class: lhs.into() });
  }
  if lhs == GLOBAL_LABEL {
    return Ok(ClassToken::Global { class: rhs.into() });
  }

  Ok(ClassToken::Labeled {
    label: lhs.into(),
    class: rhs.into(),
  })
}
