use std::string::FromUtf8Error;
use swc_core::common::input::StringInput;
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, Globals, Mark, SourceMap, GLOBALS};
use swc_core::ecma::ast::{EsVersion, Module};
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::parser::lexer::Lexer;
use swc_core::ecma::parser::{EsSyntax, Parser, Syntax};
use swc_core::ecma::transforms::base::resolver;
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

pub struct RunContext {
  /// Source-map in use
  pub source_map: Lrc<SourceMap>,
  /// Global mark from SWC resolver
  pub global_mark: Mark,
  /// Unresolved mark from SWC resolver
  pub unresolved_mark: Mark,
}

pub struct RunVisitResult<V> {
  pub output_code: String,
  #[allow(unused)]
  pub visitor: V,
  pub source_map: Vec<u8>,
}

/// Runner of the css-modules transformation
///
/// * Parse `code` with SWC (JSX enabled)
/// * Run a visitor over it
/// * Return the result
///
pub fn run_visit<V: VisitMut>(
  code: &str,
  make_visit: impl FnOnce(RunContext) -> V,
) -> Result<RunVisitResult<V>, RunVisitError> {
  let source_map = Lrc::new(SourceMap::default());
  let source_file = source_map.new_source_file(Lrc::new(FileName::Anon), code.into());

  let lexer = Lexer::new(
    Syntax::Es(EsSyntax {
      jsx: true,
      ..Default::default()
    }),
    EsVersion::default(),
    StringInput::from(&*source_file),
    None,
  );

  let mut parser = Parser::new_from(lexer);
  let mut module = parser.parse_module().map_err(RunVisitError::SwcParse)?;

  GLOBALS.set(
    &Globals::new(),
    || -> Result<RunVisitResult<V>, RunVisitError> {
      let global_mark = Mark::new();
      let unresolved_mark = Mark::new();
      module.visit_mut_with(&mut resolver(unresolved_mark, global_mark, false));

      let context = RunContext {
        source_map: source_map.clone(),
        global_mark,
        unresolved_mark,
      };
      let mut visitor = make_visit(context);
      module.visit_mut_with(&mut visitor);

      let (output_code, output_map) = emit(&source_map, &module)?;
      Ok(RunVisitResult {
        output_code,
        visitor,
        source_map: output_map,
      })
    },
  )
}

#[derive(Debug, thiserror::Error)]
pub enum RunVisitError {
  #[error("Failed to parse module")]
  SwcParse(swc_core::ecma::parser::error::Error),
  #[error("IO Error: {0}")]
  IoError(#[from] std::io::Error),
  #[error("Invalid utf-8 output: {0}")]
  InvalidUtf8Output(#[from] FromUtf8Error),
  #[error("Failed to generate source map")]
  SourceMap(#[from] sourcemap::Error),
}

fn emit(source_map: &Lrc<SourceMap>, module: &Module) -> Result<(String, Vec<u8>), RunVisitError> {
  let mut line_pos_buffer = vec![];
  let mut output_buffer = vec![];
  let writer = JsWriter::new(
    source_map.clone(),
    "\n",
    &mut output_buffer,
    Some(&mut line_pos_buffer),
  );
  let mut emitter = swc_core::ecma::codegen::Emitter {
    cfg: Default::default(),
    cm: source_map.clone(),
    comments: None,
    wr: writer,
  };
  emitter.emit_module(module)?;

  let output_code = String::from_utf8(output_buffer)?;
  let output_map = source_map.build_source_map(&line_pos_buffer);
  let mut output_map_buffer = vec![];
  output_map.to_writer(&mut output_map_buffer)?;

  Ok((output_code, output_map_buffer))
}

#[cfg(test)]
mod tests {
  use swc_core::ecma::ast::{Lit, Str};
  use swc_core::ecma::visit::VisitMut;

  use super::*;

  #[test]
  fn test_example() {
    struct Visitor;
    impl VisitMut for Visitor {
      fn visit_mut_lit(&mut self, n: &mut Lit) {
        *n = Lit::Str(Str::from("replacement"));
      }
    }

    let code = r#"console.log('test!')"#;
    let RunVisitResult { output_code, .. } = run_visit(code, |_: RunContext| Visitor).unwrap();
    assert_eq!(
      output_code,
      r#"console.log("replacement");
"#
    );
  }

  #[test]
  fn test_jsx_roundtrip() {
    struct Noop;
    impl VisitMut for Noop {}

    let code = r#"const el = <div className="a b"/>;"#;
    let RunVisitResult { output_code, .. } = run_visit(code, |_: RunContext| Noop).unwrap();
    assert!(
      output_code.contains(r#"className="a b""#),
      "unexpected output: {output_code}"
    );
  }

  #[test]
  fn test_source_map_is_emitted() {
    struct Noop;
    impl VisitMut for Noop {}

    let code = r#"console.log("hi");"#;
    let RunVisitResult { source_map, .. } = run_visit(code, |_: RunContext| Noop).unwrap();
    assert!(!source_map.is_empty());
  }
}
