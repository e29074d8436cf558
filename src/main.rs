use clap::{ArgAction, Parser};
use log::{error, info, LevelFilter};
use rb_dictionary::dictionary;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::process;

/// Loads a word list into a red black tree and reports on it.
#[derive(Parser)]
#[command(name = "rb-dictionary", version)]
struct Args {
    /// Newline-delimited word list
    #[arg(default_value = "data/words.txt")]
    words: PathBuf,

    /// Word to look up
    #[arg(short, long, default_value = "house")]
    query: String,

    /// Print the tree with the color of every node
    #[arg(long)]
    print_tree: bool,

    /// Print every word in ascending order
    #[arg(long)]
    print_words: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let args = Args::parse();

    if let Err(err) = TermLogger::init(
        level_filter(args.verbose),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Error: could not initialize logger: {}", err);
    }

    let words = match dictionary::load(&args.words) {
        Ok(words) => words,
        Err(err) => {
            error!("{}: {}", args.words.display(), err);
            process::exit(1);
        },
    };
    info!("Tree holds {} black nodes.", words.count_black());

    if args.print_words {
        for word in &words {
            println!("{}", word);
        }
    }
    if args.print_tree {
        print!("{}", words.render());
    }

    println!("{}", words.contains(args.query.as_str()));
    println!("{}", words.len());
    println!("{}", words.min().map_or("null", String::as_str));
    println!("{}", words.max().map_or("null", String::as_str));
    println!("{}", words.height());
    println!("{}", words.count_black());
}
