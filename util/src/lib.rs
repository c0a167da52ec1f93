extern crate time;

use std::error::Error;
use std::fmt;

use time::get_time;

/// Current timestamp in microseconds
pub fn ustime() -> i64 {
    let tv = get_time();
    tv.sec * 1000000 + (tv.nsec / 1000) as i64
}

/// Current timestamp in milliseconds
pub fn mstime() -> i64 {
    ustime() / 1000
}

/// Measures wall-clock time from its creation.
///
/// # Examples
///
/// ```
/// # use util::Stopwatch;
/// #
/// let watch = Stopwatch::start();
/// assert!(watch.elapsed_ms() >= 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: i64,
}

impl Stopwatch {
    pub fn start() -> Stopwatch {
        Stopwatch { started: ustime() }
    }

    pub fn elapsed_us(&self) -> i64 {
        ustime() - self.started
    }

    pub fn elapsed_ms(&self) -> i64 {
        self.elapsed_us() / 1000
    }
}

/// Why a line could not be split into arguments.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SplitError {
    /// A quoted argument was not closed before the end of the line.
    UnbalancedQuotes,
    /// A closing quote was followed by something other than whitespace.
    TrailingCharacters,
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SplitError::UnbalancedQuotes => f.write_str("unbalanced quotes"),
            SplitError::TrailingCharacters => {
                f.write_str("closing quote must be followed by a space")
            }
        }
    }
}

impl Error for SplitError {}

#[derive(PartialEq, Clone, Copy)]
enum Quote {
    None,
    Double,
    Single,
}

fn is_separator(c: u8) -> bool {
    c == 0 || (c as char).is_whitespace()
}

fn hex_digit(c: Option<&u8>) -> Option<u8> {
    c.and_then(|&c| (c as char).to_digit(16)).map(|d| d as u8)
}

/// Parses a config line string.
///
/// Arguments are separated by whitespace.  Double quoted arguments understand the `\n`, `\r`,
/// `\t` and `\xHH` escapes; single quoted arguments only `\'`.
///
/// # Examples
/// ```
/// # use util::splitargs;
/// #
/// let res = splitargs(b"hello world").unwrap();
/// assert_eq!(res, vec![b"hello".to_vec(), b"world".to_vec()]);
/// ```
///
/// ```
/// # use util::splitargs;
/// #
/// let res = splitargs(b"foo \"bar baz\"").unwrap();
/// assert_eq!(res, vec![b"foo".to_vec(), b"bar baz".to_vec()]);
/// ```
pub fn splitargs(args: &[u8]) -> Result<Vec<Vec<u8>>, SplitError> {
    let mut result = Vec::new();
    let mut i = 0;
    loop {
        while i < args.len() && is_separator(args[i]) {
            i += 1;
        }
        if i >= args.len() {
            return Ok(result);
        }

        let mut quote = Quote::None;
        let mut current = Vec::new();
        while i < args.len() {
            let c = args[i];
            match quote {
                Quote::Double if c == b'\\' && args.get(i + 1) == Some(&b'x') => {
                    match (hex_digit(args.get(i + 2)), hex_digit(args.get(i + 3))) {
                        (Some(hi), Some(lo)) => {
                            current.push(hi * 16 + lo);
                            i += 3;
                        }
                        _ => current.push(c),
                    }
                }
                Quote::Double if c == b'\\' && i + 1 < args.len() => {
                    i += 1;
                    current.push(match args[i] {
                        b'n' => b'\n',
                        b'r' => b'\r',
                        b't' => b'\t',
                        other => other,
                    });
                }
                Quote::Single if c == b'\\' && args.get(i + 1) == Some(&b'\'') => {
                    current.push(b'\'');
                    i += 1;
                }
                Quote::Double if c == b'"' => {
                    quote = Quote::None;
                    if i + 1 < args.len() && !is_separator(args[i + 1]) {
                        return Err(SplitError::TrailingCharacters);
                    }
                    i += 1;
                    break;
                }
                Quote::Single if c == b'\'' => {
                    quote = Quote::None;
                    if i + 1 < args.len() && !is_separator(args[i + 1]) {
                        return Err(SplitError::TrailingCharacters);
                    }
                    i += 1;
                    break;
                }
                Quote::None if is_separator(c) => break,
                Quote::None if c == b'"' => quote = Quote::Double,
                Quote::None if c == b'\'' => quote = Quote::Single,
                _ => current.push(c),
            }
            i += 1;
        }

        if quote != Quote::None {
            return Err(SplitError::UnbalancedQuotes);
        }
        result.push(current);
    }
}

#[cfg(test)]
mod test_util {
    use std::thread::sleep;
    use std::time::Duration;

    use super::{mstime, splitargs, SplitError, Stopwatch};

    #[test]
    fn mstime_sleep() {
        let start = mstime();
        sleep(Duration::from_millis(100));
        let end = mstime();
        assert!(start < end && start + 100 <= end && start + 500 > end);
    }

    #[test]
    fn stopwatch_sleep() {
        let watch = Stopwatch::start();
        sleep(Duration::from_millis(20));
        assert!(watch.elapsed_ms() >= 20);
        assert!(watch.elapsed_us() >= 20_000);
    }

    #[test]
    fn splitargs_quotes() {
        assert_eq!(splitargs(b"\"\\x9f\"").unwrap(), vec![vec![159u8]]);
        assert_eq!(splitargs(b"\"\"").unwrap(), vec![vec![]]);
        assert_eq!(
            splitargs(b"\"\\thello\\n\"").unwrap(),
            vec![b"\thello\n".to_vec()]
        );
        assert_eq!(splitargs(b"\"a"), Err(SplitError::UnbalancedQuotes));
    }

    #[test]
    fn splitargs_singlequotes() {
        assert_eq!(splitargs(b"'\\x9f'").unwrap(), vec![b"\\x9f".to_vec()]);
        assert_eq!(splitargs(b"''").unwrap(), vec![vec![]]);
        assert_eq!(splitargs(b"'\\''").unwrap(), vec![b"'".to_vec()]);
        assert_eq!(splitargs(b"'a"), Err(SplitError::UnbalancedQuotes));
    }

    #[test]
    fn splitargs_misc() {
        assert_eq!(splitargs(b"").unwrap(), Vec::<Vec<u8>>::new());
        assert_eq!(splitargs(b"  \t ").unwrap(), Vec::<Vec<u8>>::new());
        assert_eq!(
            splitargs(b"hello world").unwrap(),
            vec![b"hello".to_vec(), b"world".to_vec()]
        );
        assert_eq!(
            splitargs(b"  max-level   16  ").unwrap(),
            vec![b"max-level".to_vec(), b"16".to_vec()]
        );
        assert_eq!(
            splitargs(b"'hello' world").unwrap(),
            vec![b"hello".to_vec(), b"world".to_vec()]
        );
        assert_eq!(
            splitargs(b"logfile \"/tmp/a b.log\"").unwrap(),
            vec![b"logfile".to_vec(), b"/tmp/a b.log".to_vec()]
        );
        assert_eq!(
            splitargs(b"\"hello\"world"),
            Err(SplitError::TrailingCharacters)
        );
        assert_eq!(
            splitargs(b"'hello'world"),
            Err(SplitError::TrailingCharacters)
        );
    }

    #[test]
    fn splitargs_short_escape() {
        assert_eq!(splitargs(b"\"\\x9\"").unwrap(), vec![b"\\x9".to_vec()]);
    }
}
