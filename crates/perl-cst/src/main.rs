use std::process::ExitCode;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use mimalloc::MiMalloc;
use perl_errors::{Diagnostic, Renderer};
use perl_syntax::printer::{self, PrinterOptions, TriviaFilter};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(about = "Lossless syntax trees for Perl source")]
enum Options {
    /// Print the syntax tree of a file.
    Dump {
        path: Utf8PathBuf,
        /// Which whitespace, comment and POD tokens to show.
        #[arg(long, value_enum, default_value_t = Trivia::All)]
        trivia: Trivia,
        /// Print only statements and structures.
        #[arg(long)]
        no_tokens: bool,
    },
    /// Report tokenizer and parser errors of a file.
    Check { path: Utf8PathBuf },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Trivia {
    All,
    Whitespace,
    Comments,
    Pod,
    None,
}

impl From<Trivia> for TriviaFilter {
    fn from(trivia: Trivia) -> Self {
        match trivia {
            Trivia::All => Self::All,
            Trivia::Whitespace => Self::Whitespace,
            Trivia::Comments => Self::Comments,
            Trivia::Pod => Self::Pod,
            Trivia::None => Self::None,
        }
    }
}

fn read(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))
}

fn main() -> anyhow::Result<ExitCode> {
    match Options::parse() {
        Options::Dump { path, trivia, no_tokens } => {
            let text = read(&path)?;
            let document = perl_parse::parse(&text);
            let options = PrinterOptions { trivia: trivia.into(), tokens: !no_tokens };
            print!("{}", printer::print(&document, options));
            Ok(ExitCode::SUCCESS)
        }
        Options::Check { path } => {
            let text = read(&path)?;
            let mut diagnostics = Vec::<Diagnostic>::new();
            perl_parse::parse_with(&text, &mut diagnostics);

            let renderer = Renderer::styled();
            for diagnostic in &diagnostics {
                eprintln!("{}", diagnostic.render(&renderer, path.as_str(), &text));
            }

            if diagnostics.is_empty() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
        }
    }
}
