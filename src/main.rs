use std::{fs, io::Read, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use log::info;

use ll1_predict_helper::{grammar::RawGrammar, Grammar};

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Productions
    Prod,
    /// Nullable, first and follow
    Nff,
    /// Predict set of every production
    Predict,
    /// LL(1) parsing table
    Ll1,
    /// LL(1) conflicts
    Conflicts,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Plain,
    Latex,
    Json,
}

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// What to print, in order
    #[arg(value_enum, required = true)]
    outputs: Vec<Output>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// File containing the grammar (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Start symbol (default: left side of the first production)
    #[arg(short, long, value_name = "SYMBOL")]
    start: Option<String>,

    /// Exit with status 2 when the grammar is not LL(1)
    #[arg(long)]
    deny_conflicts: bool,
}

macro_rules! render {
    ($format:expr, $t:expr) => {
        match $format {
            OutputFormat::Plain => $t.to_plaintext(),
            OutputFormat::Latex => $t.to_latex(),
            OutputFormat::Json => serde_json::to_string(&$t)?,
        }
    };
}

fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut input = String::new();
            std::io::stdin().lock().read_to_string(&mut input)?;
            input
        }
    };

    let mut raw = RawGrammar::parse(&input)?;
    if let Some(start) = &cli.start {
        raw.start = Some(start.clone());
    }
    let g = Grammar::classify(&raw)?;
    let analysis = g.analyze();
    info!(
        "{} productions analyzed, {} conflicts",
        g.productions.len(),
        analysis.ambiguities.len()
    );

    for output in &cli.outputs {
        let text = match output {
            Output::Prod => render!(cli.format, g.to_production_output_vec()),
            Output::Nff => render!(cli.format, g.to_non_terminal_output_vec(&analysis.sets)),
            Output::Predict => render!(cli.format, g.to_predict_output_vec(&analysis)),
            Output::Ll1 => render!(cli.format, g.generate_ll1_parsing_table(&analysis)),
            Output::Conflicts => render!(cli.format, g.to_ambiguity_output_vec(&analysis)),
        };
        println!("{}", text);
    }

    Ok(analysis.is_ll1())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(is_ll1) if cli.deny_conflicts && !is_ll1 => ExitCode::from(2),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
