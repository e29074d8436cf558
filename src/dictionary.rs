//! Loader that builds a dictionary of words from a newline-delimited word list.

use crate::red_black_tree::RedBlackSet;
use log::{debug, info};
use std::error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::result;

/// Convenience `Error` enum for `dictionary`.
#[derive(Debug)]
pub enum Error {
    /// An input or output error, including word lists that are not valid UTF-8.
    IOError(io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IOError(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::IOError(ref error) => Some(error),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IOError(ref error) => write!(f, "could not read word list: {}", error),
        }
    }
}

/// Convenience `Result` type for `dictionary`.
pub type Result<T> = result::Result<T, Error>;

/// Loads the word list at `path` into a new set.
///
/// # Examples
///
/// ```no_run
/// use rb_dictionary::dictionary;
///
/// let words = dictionary::load("data/words.txt").unwrap();
/// println!("{} words", words.len());
/// ```
pub fn load<P>(path: P) -> Result<RedBlackSet<String>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    info!("Loading word list from {}.", path.display());
    let file = File::open(path)?;
    load_from(BufReader::new(file))
}

/// Reads words from `reader`, one per line, and inserts them in the order they appear. Trailing
/// carriage returns are stripped, blank lines are skipped, and repeated words are kept once.
///
/// # Examples
///
/// ```
/// use rb_dictionary::dictionary;
///
/// let words = dictionary::load_from("dog\nant\n\nzebra\r\nant\n".as_bytes()).unwrap();
/// assert_eq!(words.len(), 3);
/// assert_eq!(words.min().map(String::as_str), Some("ant"));
/// assert_eq!(words.max().map(String::as_str), Some("zebra"));
/// ```
pub fn load_from<R>(reader: R) -> Result<RedBlackSet<String>>
where
    R: BufRead,
{
    let mut words = RedBlackSet::new();
    let mut duplicates = 0;
    let mut blanks = 0;

    for (index, line) in reader.lines().enumerate() {
        let mut line = line?;
        if line.ends_with('\r') {
            line.pop();
        }
        if line.is_empty() {
            blanks += 1;
            continue;
        }

        if !words.contains(line.as_str()) {
            words.insert(line);
        } else {
            debug!("Skipping duplicate word {:?} on line {}.", line, index + 1);
            duplicates += 1;
        }
    }

    info!(
        "Loaded {} words ({} duplicates, {} blank lines skipped).",
        words.len(),
        duplicates,
        blanks,
    );
    Ok(words)
}
