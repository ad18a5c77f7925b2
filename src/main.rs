use clap::{Parser, Subcommand};
use splitbook::{config, generate, output, scan};
use std::path::PathBuf;

fn version_string() -> &'static str {
    if env!("SPLITBOOK_ON_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    let hash = env!("SPLITBOOK_GIT_HASH");
    if hash.is_empty() {
        "dev@unknown"
    } else {
        // Leaked once at startup
        Box::leak(format!("dev@{hash}").into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "splitbook")]
#[command(about = "Split chapter files into an mdBook chapter/section tree")]
#[command(long_about = "\
Split chapter files into an mdBook chapter/section tree

Each chapter file is cut at its `## ` headings. The text before the first
section becomes the chapter README, every section gets its own file, and
SUMMARY.md is regenerated to match.

  src/                                src/
  ├── ch01.md                         ├── SUMMARY.md
  │   # 1 Preface                     ├── ch01.md              (unchanged)
  │   ## 1.1 Multitasking      →      └── ch01/
  │   ## 1.2 About the Kernel             ├── README.md
  └── media/                              ├── 1.1-multitasking.md
                                          └── 1.2-about-the-kernel.md

Links into media/ are rewritten to ../media/ and figure blocks are centered.
Chapter files that look like chapters but don't match ch<digits>.md are
skipped with a warning.

Run 'splitbook gen-config' to print a documented splitbook.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Book source directory holding the chapter files
    #[arg(long, default_value = "src", global = true)]
    source: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Split all chapters and regenerate SUMMARY.md (the default)
    Build,
    /// Show what a build would write, without writing anything
    Check {
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock splitbook.toml with all options documented
    GenConfig,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        output::print_error(&*err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let source = &cli.source;
            println!("==> Building {}", source.display());
            let (discovery, report) = generate::build(source)?;

            println!("==> Stage 1: Chapters discovered");
            output::print_discovery(&discovery, &report.config);

            println!("==> Stage 2: Chapters split");
            output::print_chapters(&report.chapters);

            println!(
                "==> Stage 3: Table of contents → {}",
                report.summary_path.display()
            );
            output::print_build_report(&report);
            println!("Original chapter files were not modified.");
        }
        Command::Check { json } => {
            let source = &cli.source;
            let book_config = scan::load_config(source)?;
            let discovery = scan::discover(source, &book_config)?;
            let prepared = generate::prepare(&discovery, &book_config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&prepared)?);
            } else {
                println!("==> Checking {}", source.display());
                output::print_discovery(&discovery, &book_config);
                output::print_chapters(&prepared.chapters);
                println!("==> {} would be written:", book_config.summary_file);
                println!("{}", prepared.summary.render());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
