use indexmap::IndexMap;
use swc_core::atoms::Atom;
use swc_core::common::Span;
use swc_core::ecma::ast::Ident;

use crate::error::{CssModuleError, CssModuleErrorKind};

/// Per-file registry of css-module bindings.
///
/// Created fresh at the start of every file pass and only ever grows:
/// entries are inserted once and never removed or overwritten. The named
/// map is insertion-ordered so that "first registered label" is a
/// well-defined query for default inference.
#[derive(Debug, Default)]
pub struct ModuleTable {
  default_module: Option<Ident>,
  named_modules: IndexMap<Atom, Ident>,
}

impl ModuleTable {
  pub fn new() -> Self {
    ModuleTable::default()
  }

  /// True when no css-module import was seen in this file.
  pub fn is_empty(&self) -> bool {
    self.default_module.is_none() && self.named_modules.is_empty()
  }

  pub fn default_module(&self) -> Option<&Ident> {
    self.default_module.as_ref()
  }

  pub fn named(&self, label: &str) -> Option<&Ident> {
    self.named_modules.get(&Atom::from(label))
  }

  /// Registers the single unlabeled module of this file.
  pub fn insert_default(&mut self, ident: Ident, span: Span) -> Result<(), CssModuleError> {
    if self.default_module.is_some() {
      return Err(CssModuleError::new(
        CssModuleErrorKind::DuplicateDefaultModule,
        span,
      ));
    }
    self.default_module = Some(ident);
    Ok(())
  }

  /// Registers a labeled module. Labels share one namespace with
  /// specifier names, so a specifier colliding with an earlier label
  /// fails the same way.
  pub fn insert_named(
    &mut self,
    label: Atom,
    ident: Ident,
    span: Span,
  ) -> Result<(), CssModuleError> {
    if self.named_modules.contains_key(&label) {
      return Err(CssModuleError::new(
        CssModuleErrorKind::DuplicateLabel {
          label: label.to_string(),
        },
        span,
      ));
    }
    self.named_modules.insert(label, ident);
    Ok(())
  }

  /// Promotes the first-inserted named module to be the default when no
  /// unlabeled import exists. One-time and idempotent; a no-op once a
  /// default is set.
  pub fn infer_default(&mut self) {
    if self.default_module.is_some() {
      return;
    }
    if let Some((_, ident)) = self.named_modules.first() {
      self.default_module = Some(ident.clone());
    }
  }
}
