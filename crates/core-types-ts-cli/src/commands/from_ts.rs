use std::path::PathBuf;

use tracing::info;

use core_types_ts::{NonExported, ParseConfig, convert_typescript_to_core_types};

use super::io::{display_name, fail, read_input, write_output};

pub struct FromTsArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub color: bool,
    pub non_exported: NonExported,
    pub compact: bool,
}

pub fn run(args: FromTsArgs) {
    let name = display_name(&args.input);
    let source = read_input(&args.input).unwrap_or_else(|msg| fail(&msg));

    let config = ParseConfig::new().non_exported(args.non_exported);
    let result = match convert_typescript_to_core_types(&source, &config) {
        Ok(result) => result,
        Err(e) => {
            let rendered = e
                .printer()
                .source(&source)
                .path(&name)
                .colored(args.color)
                .render();
            eprintln!("{rendered}");
            std::process::exit(1);
        }
    };

    if !result.not_converted.is_empty() {
        info!(skipped = ?result.not_converted, "left out unreferenced declarations");
    }

    let mut json = if args.compact {
        result.data.to_json_compact()
    } else {
        result.data.to_json()
    };
    json.push('\n');
    write_output(args.output.as_deref(), &json).unwrap_or_else(|msg| fail(&msg));
}
