use std::{fs, path::{Path, PathBuf}, process, rc::Rc, time::Instant};

use clap::Parser as ClapParser;
use log::{error, info, LevelFilter};

use tastier::{
    errors::{errors::Error, reporter::MIN_ERROR_DISTANCE},
    lexer::lexer::{tokenize, TokenStream},
    parser::parser::translate,
    Options,
};

#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source file to translate
    input: PathBuf,

    /// Listing to write, defaults to the input with an .asm extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Tokens to consume after an error before reporting another
    #[arg(long, default_value_t = MIN_ERROR_DISTANCE)]
    min_error_distance: usize,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let source = match fs::read_to_string(&cli.input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error reading file '{}': {}", cli.input.display(), err);
            process::exit(1);
        }
    };

    let file_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("shell"));

    let start = Instant::now();

    let tokens = match tokenize(source.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(err) => {
            display_error(&err, &source, &cli.input);
            process::exit(1);
        }
    };

    info!("Tokenized in {:?}", start.elapsed());

    let translate_start = Instant::now();
    let compilation = translate(
        TokenStream::new(tokens, Rc::new(file_name)),
        Options {
            min_error_distance: cli.min_error_distance,
        },
    );

    info!("Translated in {:?}", translate_start.elapsed());

    for diagnostic in compilation.diagnostics.iter() {
        println!("{}", diagnostic);
    }

    // The listing is written even on failure, to show how far analysis got
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("asm"));
    if let Err(err) = fs::write(&output, compilation.render()) {
        error!("failed to write {}: {}", output.display(), err);
        process::exit(1);
    }

    info!("Wrote {} in {:?}", output.display(), start.elapsed());
    println!("{}", compilation.summary());

    if !compilation.is_success() {
        process::exit(1);
    }
}

fn display_error(error: &Error, source: &str, file: &Path) {
    /*
        Error: UnrecognisedToken
        -> program.tas
           |
        20 | x := #;
           | -----^
    */

    let position = error.get_position();
    let line_text = source
        .lines()
        .nth(position.line.saturating_sub(1) as usize)
        .unwrap_or_default();

    let line_str = position.line.to_string();
    let padding = line_str.len() + 2;

    println!("{}", error);
    println!("Error: {}", error.get_error_name());
    println!("-> {}", file.display());
    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    println!("{} | {}", line_str, line_text_removed.trim_end());

    let arrows = (position.col as usize).saturating_sub(removed_whitespace).max(1);

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string.len() - string.trim_start().len();
    (&string[start..], start)
}
