use std::path::PathBuf;

use tracing::debug;

use core_types::NodeDocument;
use core_types_ts::{EmitConfig, convert_core_types_to_typescript};

use super::io::{display_name, fail, read_input, write_output};

pub struct ToTsArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub color: bool,
    pub declaration: bool,
    pub use_unknown: bool,
    pub no_header: bool,
    pub user_package: Option<String>,
    pub user_package_url: Option<String>,
}

pub fn run(args: ToTsArgs) {
    let name = display_name(&args.input);
    let json = read_input(&args.input).unwrap_or_else(|msg| fail(&msg));

    let doc = NodeDocument::from_json(&json).unwrap_or_else(|e| fail(&format!("{name}: {e}")));
    debug!(input = %name, types = doc.types.len(), "read core-types document");

    let config = emit_config(&args);
    let result = match convert_core_types_to_typescript(&doc, &config) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}", e.printer().path(&name).colored(args.color).render());
            std::process::exit(1);
        }
    };

    write_output(args.output.as_deref(), &result.data).unwrap_or_else(|msg| fail(&msg));
}

fn emit_config(args: &ToTsArgs) -> EmitConfig {
    let mut config = EmitConfig::new()
        .declaration(args.declaration)
        .use_unknown(args.use_unknown)
        .no_descriptive_header(args.no_header);
    if let Some(package) = &args.user_package {
        config = config.user_package(package.as_str());
    }
    if let Some(url) = &args.user_package_url {
        config = config.user_package_url(url.as_str());
    }
    config
}
