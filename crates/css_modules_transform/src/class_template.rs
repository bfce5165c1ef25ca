use swc_core::common::{Span, DUMMY_SP};
use swc_core::ecma::ast::{
  ComputedPropName, Expr, Ident, Lit, MemberExpr, MemberProp, Str, Tpl, TplElement,
};

use crate::error::{CssModuleError, CssModuleErrorKind};
use crate::module_table::ModuleTable;
use crate::split::{split_class_token, ClassToken};

/// Compiles a class attribute string into a template literal mixing
/// verbatim classnames (quasis) with `module["classname"]` lookups
/// (substitutions).
///
/// The template always satisfies `quasis.len() == exprs.len() + 1`:
/// literal tokens extend the open quasi, every substitution closes it
/// and opens a new one holding a single separating space, and the final
/// quasi is trimmed and tail-marked.
pub fn compile_class_template(
  classes: &str,
  table: &ModuleTable,
  span: Span,
) -> Result<Tpl, CssModuleError> {
  // the open literal accumulator; every substitution closes it as one
  // quasi and re-opens it with a single separating space
  let mut open = String::new();
  let mut quasis: Vec<String> = vec![];
  let mut exprs: Vec<Box<Expr>> = vec![];

  for token in classes.split(' ').filter(|token| !token.is_empty()) {
    let lookup = match split_class_token(token, span)? {
      ClassToken::Global { class } => {
        open.push_str(&class);
        open.push(' ');
        continue;
      }
      ClassToken::Labeled { label, class } => {
        let Some(module) = table.named(&label) else {
          return Err(CssModuleError::new(
            CssModuleErrorKind::UnknownLabel {
              label: label.to_string(),
              class: class.to_string(),
            },
            span,
          ));
        };
        module_member_expr(module, &class)
      }
      ClassToken::Default { class } => {
        let Some(module) = table.default_module() else {
          return Err(CssModuleError::new(
            CssModuleErrorKind::NoDefaultModule {
              class: class.to_string(),
            },
            span,
          ));
        };
        module_member_expr(module, &class)
      }
    };

    exprs.push(Box::new(lookup));
    quasis.push(std::mem::replace(&mut open, " ".to_string()));
  }

  open.truncate(open.trim_end().len());
  quasis.push(open);

  let tail_index = quasis.len() - 1;
  Ok(Tpl {
    span,
    exprs,
    quasis: quasis
      .into_iter()
      .enumerate()
      .map(|(index, raw)| TplElement {
        span: DUMMY_SP,
        tail: index == tail_index,
        cooked: Some(raw.clone().into()),
        raw: raw.into(),
      })
      .collect(),
  })
}

/// `module["classname"]` -- a computed lookup, so classnames with
/// hyphens or other non-identifier characters work unmodified.
fn module_member_expr(module: &Ident, class: &str) -> Expr {
  Expr::Member(MemberExpr {
    span: DUMMY_SP,
    obj: Box::new(Expr::Ident(module.clone())),
    prop: MemberProp::Computed(ComputedPropName {
      span: DUMMY_SP,
      expr: Box::new(Expr::Lit(Lit::Str(Str {
        span: DUMMY_SP,
        value: class.into(),
        raw: None,
      }))),
    }),
  })
}

#[cfg(test)]
mod tests {
  use swc_core::common::SyntaxContext;

  use super::*;

  fn ident(name: &str) -> Ident {
    Ident::new(name.into(), DUMMY_SP, SyntaxContext::empty())
  }

  fn table_with(default: Option<&str>, named: &[(&str, &str)]) -> ModuleTable {
    let mut table = ModuleTable::new();
    if let Some(name) = default {
      table.insert_default(ident(name), DUMMY_SP).unwrap();
    }
    for (label, binding) in named {
      table
        .insert_named((*label).into(), ident(binding), DUMMY_SP)
        .unwrap();
    }
    table
  }

  fn raw_quasis(tpl: &Tpl) -> Vec<&str> {
    tpl.quasis.iter().map(|quasi| quasi.raw.as_ref()).collect()
  }

  fn substitution(tpl: &Tpl, index: usize) -> (String, String) {
    let Expr::Member(member) = &*tpl.exprs[index] else {
      panic!("substitution {index} is not a member expression");
    };
    let Expr::Ident(object) = &*member.obj else {
      panic!("substitution {index} object is not an identifier");
    };
    let MemberProp::Computed(prop) = &member.prop else {
      panic!("substitution {index} is not a computed lookup");
    };
    let Expr::Lit(Lit::Str(class)) = &*prop.expr else {
      panic!("substitution {index} property is not a string literal");
    };
    (object.sym.to_string(), class.value.to_string())
  }

  #[test]
  fn test_two_labeled_tokens() {
    let table = table_with(None, &[("style", "style"), ("layout", "layout")]);
    let tpl =
      compile_class_template("layout:grid-1 style:clr-green", &table, DUMMY_SP).unwrap();

    assert_eq!(raw_quasis(&tpl), vec!["", " ", ""]);
    assert_eq!(substitution(&tpl, 0), ("layout".into(), "grid-1".into()));
    assert_eq!(substitution(&tpl, 1), ("style".into(), "clr-green".into()));
    assert!(tpl.quasis.last().unwrap().tail);
  }

  #[test]
  fn test_global_then_default() {
    let table = table_with(Some("style"), &[]);
    let tpl = compile_class_template("foo-bar:g baz", &table, DUMMY_SP).unwrap();

    assert_eq!(raw_quasis(&tpl), vec!["foo-bar ", ""]);
    assert_eq!(substitution(&tpl, 0), ("style".into(), "baz".into()));
  }

  #[test]
  fn test_quasi_count_invariant() {
    let table = table_with(Some("style"), &[("m1", "_m1")]);
    for classes in [
      "a",
      "a b",
      "a:g",
      "m1:a b:g c",
      "  spaced   out  ",
      "m1:a m1:b m1:c",
    ] {
      let tpl = compile_class_template(classes, &table, DUMMY_SP).unwrap();
      assert_eq!(tpl.quasis.len(), tpl.exprs.len() + 1, "classes: {classes}");
      let joined = tpl
        .quasis
        .iter()
        .map(|quasi| quasi.raw.as_ref())
        .collect::<Vec<_>>()
        .join("X");
      assert!(!joined.contains("  "), "doubled space for: {classes}");
      assert!(!joined.ends_with(' '), "trailing space for: {classes}");
    }
  }

  #[test]
  fn test_repeated_spaces_collapse() {
    let table = table_with(Some("style"), &[]);
    let tpl = compile_class_template("a:g   b:g", &table, DUMMY_SP).unwrap();
    assert_eq!(raw_quasis(&tpl), vec!["a b"]);
    assert!(tpl.exprs.is_empty());
  }

  #[test]
  fn test_unknown_label() {
    let table = table_with(Some("style"), &[]);
    let err = compile_class_template("missing:grid", &table, DUMMY_SP).unwrap_err();
    assert_eq!(
      err.kind,
      CssModuleErrorKind::UnknownLabel {
        label: "missing".to_string(),
        class: "grid".to_string(),
      }
    );
  }

  #[test]
  fn test_no_default_module() {
    let mut table = ModuleTable::new();
    table
      .insert_named("m1".into(), ident("_m1"), DUMMY_SP)
      .unwrap();
    // no inference has run; bare tokens have nothing to resolve against
    let err = compile_class_template("bare", &table, DUMMY_SP).unwrap_err();
    assert_eq!(
      err.kind,
      CssModuleErrorKind::NoDefaultModule {
        class: "bare".to_string()
      }
    );
  }

  #[test]
  fn test_malformed_token_errors_regardless_of_table() {
    let table = table_with(Some("style"), &[]);
    let err = compile_class_template("foo-bar: baz", &table, DUMMY_SP).unwrap_err();
    assert!(matches!(err.kind, CssModuleErrorKind::MalformedToken { .. }));
  }

  #[test]
  fn test_global_wins_over_module_labeled_g() {
    let table = table_with(Some("style"), &[("g", "_g")]);
    let tpl = compile_class_template("foo:g", &table, DUMMY_SP).unwrap();
    assert_eq!(raw_quasis(&tpl), vec!["foo"]);
    assert!(tpl.exprs.is_empty());
  }
}
