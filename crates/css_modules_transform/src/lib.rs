//! Rewrites labeled css-module imports and string-valued `className`
//! attributes.
//!
//! Imports such as `import "m1:./a.module.css"` become ordinary default
//! imports of the bare path, and class strings such as
//! `"m1:grid-1 foo-bar:g baz"` become template literals indexing into
//! the imported module objects (`` `${_m1["grid-1"]} foo-bar ${_style["baz"]}` ``).

mod class_template;
mod error;
mod import_rewriter;
mod module_table;
mod split;
mod visitor;

use swc_core::ecma::ast::Program;
use swc_core::ecma::visit::VisitMutWith;

pub use crate::class_template::compile_class_template;
pub use crate::error::{CssModuleError, CssModuleErrorKind, SourceLocation};
pub use crate::import_rewriter::rewrite_import;
pub use crate::module_table::ModuleTable;
pub use crate::split::{
  is_module_style_sheet, split_class_token, split_module_source, ClassToken, ImportDirective,
  GLOBAL_LABEL,
};
pub use crate::visitor::{CssModulesConfig, CssModulesVisitor};

/// Runs the css-module rewrite over one file's program.
///
/// A fresh [`ModuleTable`] is created for the pass and dropped with it;
/// the first domain error aborts the file and is returned.
pub fn apply_css_modules(
  program: &mut Program,
  config: CssModulesConfig,
) -> Result<(), CssModuleError> {
  let mut visitor = CssModulesVisitor::new(config);
  program.visit_mut_with(&mut visitor);
  visitor.into_result()
}
