use css_modules_transform::{apply_css_modules, CssModulesConfig};
use swc_core::ecma::ast::Program;
use swc_core::plugin::errors::HANDLER;
use swc_core::plugin::{plugin_transform, proxies::TransformPluginProgramMetadata};

#[plugin_transform]
pub fn process_transform(
  mut program: Program,
  metadata: TransformPluginProgramMetadata,
) -> Program {
  let config = match metadata.get_transform_plugin_config() {
    Some(config_string) => serde_json::from_str::<CssModulesConfig>(&config_string)
      .expect("Invalid JSON configuration"),
    None => CssModulesConfig::default(),
  };

  if let Err(error) = apply_css_modules(&mut program, config) {
    HANDLER.with(|handler| {
      handler
        .struct_span_err(error.span, &error.to_string())
        .emit();
    });
  }

  program
}
