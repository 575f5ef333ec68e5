use clap::{Parser, Subcommand};
use std::path::PathBuf;
use syntax_diagrams::config::{self, ConfigOverrides, DiagramConfig};
use syntax_diagrams::renderer::ConsoleRenderer;
use syntax_diagrams::{generate, logging, output};

/// Flags that override the grammar and output settings of the config file.
#[derive(clap::Args, Clone)]
struct PathArgs {
    /// Grammar file to render (overrides `grammar_file`)
    #[arg(long)]
    grammar: Option<PathBuf>,

    /// Output directory for images and index (overrides `output_dir`)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "syntax-diagrams")]
#[command(about = "Render syntax diagrams for every grammar rule and index them")]
#[command(long_about = "\
Render syntax diagrams for every grammar rule and index them

An external tool (ANTLRWorks by default) renders one image per rule into the
output directory; syntax-diagrams then writes an index.html linking them all.

  target/antlrdiagrams/
  ├── Atom.png
  ├── expr.png
  ├── prog.png
  └── index.html         # table of contents + one section per rule

Settings are read from diagrams.toml when present. Run
'syntax-diagrams gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file [default: diagrams.toml, optional]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive (e.g. debug, info,syntax_diagrams=trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format: compact, pretty or json
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the diagrams and write the index page
    Generate(PathArgs),
    /// Rewrite the index page from images already in the output directory
    Index {
        /// Output directory holding the images (overrides `output_dir`)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate the config, grammar file and renderer without writing anything
    Check(PathArgs),
    /// Print a stock diagrams.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref(), cli.log_format.as_deref())?;

    match cli.command {
        Command::Generate(paths) => {
            let config = load_config(cli.config.as_deref(), paths.into())?;
            let renderer = ConsoleRenderer::from_config(&config.renderer);
            let summary = generate::generate(&config, &renderer)?;
            output::print_generate_output(&summary);
        }
        Command::Index { output } => {
            let overrides = ConfigOverrides {
                grammar_file: None,
                output_dir: output,
            };
            let config = load_config(cli.config.as_deref(), overrides)?;
            config.validate_output()?;
            let summary =
                generate::build_index(&config.output_dir, &config.renderer.format, &config.index)?;
            output::print_generate_output(&summary);
        }
        Command::Check(paths) => {
            let config = load_config(cli.config.as_deref(), paths.into())?;
            let report = generate::check(&config)?;
            output::print_check_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

impl From<PathArgs> for ConfigOverrides {
    fn from(args: PathArgs) -> Self {
        Self {
            grammar_file: args.grammar,
            output_dir: args.output,
        }
    }
}

/// Load the config file and apply command-line overrides.
///
/// The default `diagrams.toml` is optional; an explicitly named file must exist.
fn load_config(
    path: Option<&std::path::Path>,
    overrides: ConfigOverrides,
) -> Result<DiagramConfig, Box<dyn std::error::Error>> {
    let path = match path {
        Some(path) if !path.exists() => {
            return Err(format!("config file not found: {}", path.display()).into());
        }
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(config::DEFAULT_CONFIG_FILE),
    };
    Ok(config::load_config(&path)?.apply_overrides(overrides))
}
