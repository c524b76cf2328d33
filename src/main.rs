use std::error;
use std::path::PathBuf;

use bibtex2html::convert;

use clap::Parser as CLIParser;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Settings {
    /// Increase logging verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u64,

    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Fill an HTML template with the publication list
    Html {
        /// Filepath to the .bib file
        #[clap(value_parser)]
        bibfile: PathBuf,

        /// Filepath to the HTML template containing the placeholder markers
        #[clap(value_parser)]
        template: PathBuf,

        /// Filepath the filled template is written to
        #[clap(value_parser)]
        output: PathBuf,
    },

    /// Write one Markdown front matter document per entry
    Md {
        /// Filepath to the .bib file
        #[clap(value_parser)]
        bibfile: PathBuf,

        /// Existing directory receiving the <id>.md files
        #[clap(value_parser)]
        outdir: PathBuf,
    },

    /// Print the parsed entries as JSON
    #[cfg(feature = "json")]
    Json {
        /// Filepath to the .bib file
        #[clap(value_parser)]
        bibfile: PathBuf,
    },
}

fn init_logging(verbose: u64) {
    let default = match verbose {
        0 => "bibtex2html=warn",
        1 => "bibtex2html=info",
        2 => "bibtex2html=debug",
        _ => "bibtex2html=trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

#[cfg(feature = "json")]
fn print_json(bibfile: &std::path::Path) -> Result<(), Box<dyn error::Error>> {
    use bibtex2html::{BibEntry, Parser};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Entries<'e> {
        data: &'e [BibEntry],
    }

    let bibliography = Parser::from_file(bibfile)?.bibliography();
    let entries = Entries {
        data: bibliography.entries(),
    };
    println!("{}", serde_json::to_string(&entries)?);

    Ok(())
}

fn main() -> Result<(), Box<dyn error::Error>> {
    let settings = Settings::parse();
    init_logging(settings.verbose);

    match &settings.command {
        Command::Html {
            bibfile,
            template,
            output,
        } => {
            let today = chrono::Local::now().date_naive();
            convert::convert_html(bibfile, template, output, today)?;
        }
        Command::Md { bibfile, outdir } => {
            convert::convert_markdown(bibfile, outdir)?;
        }
        #[cfg(feature = "json")]
        Command::Json { bibfile } => print_json(bibfile)?,
    }

    Ok(())
}
