use swc_core::atoms::Atom;
use swc_core::common::Span;
use swc_core::ecma::ast::{
  Ident, ImportDecl, ImportDefaultSpecifier, ImportSpecifier, Str,
};
use swc_core::ecma::utils::private_ident;
use tracing::debug;

use crate::error::{CssModuleError, CssModuleErrorKind};
use crate::module_table::ModuleTable;
use crate::split::{is_module_style_sheet, split_module_source, ImportDirective};

/// Normalizes one css-module import into a single default import of the
/// bare module path and registers its binding in the table.
///
/// Imports whose source does not name a module style-sheet are left
/// untouched. The rewritten statement always carries exactly one default
/// specifier, so feeding the output through this pass again is a no-op
/// at the statement level.
pub fn rewrite_import(
  node: &mut ImportDecl,
  table: &mut ModuleTable,
) -> Result<(), CssModuleError> {
  let directive = split_module_source(&node.src.value);
  if !is_module_style_sheet(&directive.module_path) {
    return Ok(());
  }

  let span = node.span;
  let explicit = explicit_default_specifier(node, span)?;
  // an empty label prefix (":./a.module.css") counts as no label at all
  let label = directive.label.clone().filter(|label| !label.is_empty());

  let binding = match &explicit {
    Some(ident) => ident.clone(),
    None => {
      let hint = match &label {
        Some(label) => format!("_{label}"),
        None => "_style".to_string(),
      };
      private_ident!(hint)
    }
  };

  register(table, &explicit, &label, &binding, span)?;
  debug!(
    module_path = %directive.module_path,
    binding = %binding.sym,
    "registered css module"
  );

  replace_with_default_import(node, binding, directive);
  Ok(())
}

/// The statement's own default specifier, if any. Anything other than
/// "no specifier" or "one default specifier" is rejected.
fn explicit_default_specifier(
  node: &ImportDecl,
  span: Span,
) -> Result<Option<Ident>, CssModuleError> {
  if node.specifiers.len() > 1 {
    return Err(CssModuleError::new(
      CssModuleErrorKind::MultipleSpecifiers {
        import_source: node.src.value.to_string(),
      },
      span,
    ));
  }

  match node.specifiers.first() {
    None => Ok(None),
    Some(ImportSpecifier::Default(default)) => Ok(Some(default.local.clone())),
    Some(_) => Err(CssModuleError::new(
      CssModuleErrorKind::NonDefaultImport {
        import_source: node.src.value.to_string(),
      },
      span,
    )),
  }
}

fn register(
  table: &mut ModuleTable,
  explicit: &Option<Ident>,
  label: &Option<Atom>,
  binding: &Ident,
  span: Span,
) -> Result<(), CssModuleError> {
  match (explicit, label) {
    // import "./a.module.css" -- the anonymous default module
    (None, None) => table.insert_default(binding.clone(), span),
    // import "m1:./a.module.css"
    (None, Some(label)) => table.insert_named(label.clone(), binding.clone(), span),
    // import style from "./a.module.css" or import style from "m1:./a.module.css"
    (Some(ident), label) => {
      table.insert_named(ident.sym.clone(), binding.clone(), span)?;
      if let Some(label) = label {
        if *label != ident.sym {
          table.insert_named(label.clone(), binding.clone(), span)?;
        }
      }
      Ok(())
    }
  }
}

fn replace_with_default_import(node: &mut ImportDecl, binding: Ident, directive: ImportDirective) {
  node.specifiers = vec![ImportSpecifier::Default(ImportDefaultSpecifier {
    span: binding.span,
    local: binding,
  })];
  node.src = Box::new(Str {
    span: node.src.span,
    value: directive.module_path.into(),
    raw: None,
  });
}
