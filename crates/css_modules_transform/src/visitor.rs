use serde::Deserialize;
use swc_core::ecma::ast::{
  Expr, ImportDecl, JSXAttr, JSXAttrName, JSXAttrValue, JSXExpr, JSXExprContainer, Lit,
};
use swc_core::ecma::visit::{VisitMut, VisitMutWith};
use tracing::debug;

use crate::class_template::compile_class_template;
use crate::error::CssModuleError;
use crate::import_rewriter::rewrite_import;
use crate::module_table::ModuleTable;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssModulesConfig {
  /// The JSX attribute holding class strings to rewrite.
  #[serde(default = "default_attribute_name")]
  pub attribute_name: String,
}

fn default_attribute_name() -> String {
  "className".to_string()
}

impl Default for CssModulesConfig {
  fn default() -> CssModulesConfig {
    CssModulesConfig {
      attribute_name: default_attribute_name(),
    }
  }
}

/// Rewrites labeled css-module imports and string-valued class
/// attributes within one file.
///
/// The visitor owns the per-file [`ModuleTable`]. Imports are visited in
/// document order and each registers its binding; attributes only read
/// the table, except for the one-time default-module inference. The
/// first domain error stops all further rewriting; callers surface it
/// through [`CssModulesVisitor::into_result`].
pub struct CssModulesVisitor {
  config: CssModulesConfig,
  table: ModuleTable,
  error: Option<CssModuleError>,
}

impl CssModulesVisitor {
  pub fn new(config: CssModulesConfig) -> Self {
    CssModulesVisitor {
      config,
      table: ModuleTable::new(),
      error: None,
    }
  }

  pub fn table(&self) -> &ModuleTable {
    &self.table
  }

  pub fn into_result(self) -> Result<(), CssModuleError> {
    match self.error {
      Some(error) => Err(error),
      None => Ok(()),
    }
  }
}

impl VisitMut for CssModulesVisitor {
  fn visit_mut_import_decl(&mut self, node: &mut ImportDecl) {
    if self.error.is_some() {
      return;
    }
    if let Err(error) = rewrite_import(node, &mut self.table) {
      self.error = Some(error);
    }
  }

  fn visit_mut_jsx_attr(&mut self, node: &mut JSXAttr) {
    if self.error.is_some() {
      return;
    }

    let JSXAttrName::Ident(name) = &node.name else {
      node.visit_mut_children_with(self);
      return;
    };
    if name.sym.as_ref() != self.config.attribute_name.as_str() {
      node.visit_mut_children_with(self);
      return;
    }

    // only plain string values are rewritten; expression-valued
    // attributes pass through
    let (classes, span) = match &node.value {
      Some(JSXAttrValue::Lit(Lit::Str(value))) => (value.value.clone(), value.span),
      _ => {
        node.visit_mut_children_with(self);
        return;
      }
    };

    // no css-module import was ever seen in this file
    if self.table.is_empty() {
      return;
    }

    self.table.infer_default();

    match compile_class_template(&classes, &self.table, span) {
      Ok(template) => {
        debug!(classes = %classes, "rewrote class attribute");
        node.value = Some(JSXAttrValue::JSXExprContainer(JSXExprContainer {
          span,
          expr: JSXExpr::Expr(Box::new(Expr::Tpl(template))),
        }));
      }
      Err(error) => self.error = Some(error),
    }
  }
}
