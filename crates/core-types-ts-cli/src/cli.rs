use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use core_types_ts::NonExported;

use crate::commands::from_ts::FromTsArgs;
use crate::commands::to_ts::ToTsArgs;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum NonExportedChoice {
    #[default]
    Include,
    IncludeIfReferenced,
    Fail,
}

impl From<NonExportedChoice> for NonExported {
    fn from(choice: NonExportedChoice) -> Self {
        match choice {
            NonExportedChoice::Include => NonExported::Include,
            NonExportedChoice::IncludeIfReferenced => NonExported::IncludeIfReferenced,
            NonExportedChoice::Fail => NonExported::Fail,
        }
    }
}

#[derive(Parser)]
#[command(name = "core-types-ts", bin_name = "core-types-ts")]
#[command(about = "Convert between core-types JSON and TypeScript declarations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Emit TypeScript declarations for a core-types document
    #[command(after_help = r#"EXAMPLES:
  core-types-ts to-ts types.json
  core-types-ts to-ts types.json -o types.ts --use-unknown
  cat types.json | core-types-ts to-ts - --user-package my-package"#)]
    ToTs(ToTsCommand),

    /// Parse TypeScript declarations into a core-types document
    #[command(after_help = r#"EXAMPLES:
  core-types-ts from-ts types.ts
  core-types-ts from-ts types.ts --non-exported include-if-referenced --compact"#)]
    FromTs(FromTsCommand),
}

#[derive(Args)]
pub struct IoArgs {
    /// Input file (use "-" for stdin)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write to FILE instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Colorize diagnostics output
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorChoice,
}

#[derive(Args)]
pub struct ToTsCommand {
    #[command(flatten)]
    pub io: IoArgs,

    /// Emit a bare type expression instead of declarations (single-type documents only)
    #[arg(long)]
    pub no_declaration: bool,

    /// Write the top type as `unknown` instead of `any`
    #[arg(long)]
    pub use_unknown: bool,

    /// Leave out the generated-file banner
    #[arg(long)]
    pub no_header: bool,

    /// Package the output is generated on behalf of
    #[arg(long, value_name = "NAME")]
    pub user_package: Option<String>,

    /// Link to the package the output is generated on behalf of
    #[arg(long, value_name = "URL")]
    pub user_package_url: Option<String>,
}

#[derive(Args)]
pub struct FromTsCommand {
    #[command(flatten)]
    pub io: IoArgs,

    /// What to do with declarations that are not exported
    #[arg(long, default_value = "include", value_name = "POLICY")]
    pub non_exported: NonExportedChoice,

    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,
}

impl From<ToTsCommand> for ToTsArgs {
    fn from(c: ToTsCommand) -> Self {
        Self {
            input: c.io.input,
            output: c.io.output,
            color: c.io.color.should_colorize(),
            declaration: !c.no_declaration,
            use_unknown: c.use_unknown,
            no_header: c.no_header,
            user_package: c.user_package,
            user_package_url: c.user_package_url,
        }
    }
}

impl From<FromTsCommand> for FromTsArgs {
    fn from(c: FromTsCommand) -> Self {
        Self {
            input: c.io.input,
            output: c.io.output,
            color: c.io.color.should_colorize(),
            non_exported: c.non_exported.into(),
            compact: c.compact,
        }
    }
}
