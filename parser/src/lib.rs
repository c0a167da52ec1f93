use std::error::Error;
use std::fmt;
use std::io;
use std::num::ParseIntError;
use std::str::{from_utf8, Utf8Error};

/// A command argument
#[derive(Debug, Clone)]
pub struct Argument {
    /// The position in the array
    pub pos: usize,
    /// The length in the array
    pub len: usize,
}

/// A keyword and its operands, still as raw tokens.
pub struct ParsedCommand<'a> {
    /// The data itself
    data: &'a [u8],
    /// The arguments location and length; the keyword is the first one.
    pub argv: Vec<Argument>,
}

/// An operation read from the input, with its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add(i64),
    Remove(i64),
    Contains(i64),
    /// Zero based position.  Negative positions are kept so they can be reported.
    Get(i64),
    First,
    Last,
    Ceiling(i64),
    Floor(i64),
    Rebuild,
    End,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Command::Add(x) => write!(f, "Add {}", x),
            Command::Remove(x) => write!(f, "Remove {}", x),
            Command::Contains(x) => write!(f, "Contains {}", x),
            Command::Get(n) => write!(f, "Get {}", n),
            Command::First => f.write_str("First"),
            Command::Last => f.write_str("Last"),
            Command::Ceiling(x) => write!(f, "Ceiling {}", x),
            Command::Floor(x) => write!(f, "Floor {}", x),
            Command::Rebuild => f.write_str("Rebuild"),
            Command::End => f.write_str("End"),
        }
    }
}

/// Error parsing
#[derive(Debug, PartialEq)]
pub enum ParseError {
    /// The received buffer is valid but needs more data
    Incomplete,
    /// The received buffer is invalid
    BadProtocol(String),
    /// Expected one type of argument and received another
    InvalidArgument,
}

impl ParseError {
    pub fn is_incomplete(&self) -> bool {
        match *self {
            ParseError::Incomplete => true,
            _ => false,
        }
    }

    fn response_string(&self) -> String {
        match *self {
            ParseError::Incomplete => "Incomplete data".to_owned(),
            ParseError::BadProtocol(ref s) => format!("Protocol error: {}", s),
            ParseError::InvalidArgument => "Invalid argument".to_owned(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.response_string())
    }
}

impl Error for ParseError {}

impl From<Utf8Error> for ParseError {
    fn from(_: Utf8Error) -> ParseError {
        ParseError::InvalidArgument
    }
}

impl From<ParseIntError> for ParseError {
    fn from(_: ParseIntError) -> ParseError {
        ParseError::InvalidArgument
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> ParseError {
        ParseError::BadProtocol(format!("cannot read input: {}", e))
    }
}

impl<'a> ParsedCommand<'a> {
    /// Creates a new parser with the data and arguments provided
    pub fn new(data: &[u8], argv: Vec<Argument>) -> ParsedCommand {
        ParsedCommand { data, argv }
    }

    /// Gets an i64 from a parameter
    ///
    /// # Examples
    ///
    /// ```
    /// # use parser::{ParsedCommand, Argument};
    /// let parser = ParsedCommand::new(b"-123", vec![Argument { pos: 0, len: 4 }]);
    /// assert_eq!(parser.get_i64(0).unwrap(), -123);
    /// ```
    pub fn get_i64(&self, pos: usize) -> Result<i64, ParseError> {
        let s = self.get_str(pos)?;

        Ok(s.parse::<i64>()?)
    }

    /// Gets an str from a parameter
    ///
    /// # Examples
    ///
    /// ```
    /// # use parser::{ParsedCommand, Argument};
    /// let parser = ParsedCommand::new(b"foo", vec![Argument { pos: 0, len: 3 }]);
    /// assert_eq!(parser.get_str(0).unwrap(), "foo");
    /// ```
    pub fn get_str(&self, pos: usize) -> Result<&str, ParseError> {
        let data = self.get_slice(pos)?;
        Ok(from_utf8(&data)?)
    }

    /// Gets a &[u8] from a parameter
    ///
    /// # Examples
    ///
    /// ```
    /// # use parser::{ParsedCommand, Argument};
    /// let parser = ParsedCommand::new(b"foo", vec![Argument { pos: 0, len: 3 }]);
    /// assert_eq!(parser.get_slice(0).unwrap(), b"foo");
    /// ```
    pub fn get_slice(&self, pos: usize) -> Result<&[u8], ParseError> {
        if pos >= self.argv.len() {
            return Err(ParseError::InvalidArgument);
        }
        let arg = &self.argv[pos];
        Ok(&self.data[arg.pos..arg.pos + arg.len])
    }

    /// Interprets the tokens as a `Command`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parser::{parse, Command};
    /// let (parsed, _) = parse(b"Floor -7\n", false).unwrap();
    /// assert_eq!(parsed.command().unwrap(), Command::Floor(-7));
    /// ```
    pub fn command(&self) -> Result<Command, ParseError> {
        let keyword = self.get_str(0)?;
        Ok(match keyword {
            "Add" => Command::Add(self.get_i64(1)?),
            "Remove" => Command::Remove(self.get_i64(1)?),
            "Contains" => Command::Contains(self.get_i64(1)?),
            "Get" => Command::Get(self.get_i64(1)?),
            "Ceiling" => Command::Ceiling(self.get_i64(1)?),
            "Floor" => Command::Floor(self.get_i64(1)?),
            "First" => Command::First,
            "Last" => Command::Last,
            "Rebuild" => Command::Rebuild,
            "End" => Command::End,
            _ => {
                return Err(ParseError::BadProtocol(format!(
                    "unknown keyword '{}'",
                    keyword
                )))
            }
        })
    }
}

impl<'a> fmt::Debug for ParsedCommand<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for a in self.argv.iter() {
            write!(
                f,
                "{:?} ",
                String::from_utf8_lossy(&self.data[a.pos..(a.pos + a.len)])
            )?;
        }
        Ok(())
    }
}

/// Number of operands following a keyword.  Unknown keywords take none, so that they can be
/// skipped on their own.
fn arity(keyword: &[u8]) -> usize {
    match keyword {
        b"Add" | b"Remove" | b"Contains" | b"Get" | b"Ceiling" | b"Floor" => 1,
        _ => 0,
    }
}

fn is_separator(c: u8) -> bool {
    c == 0 || (c as char).is_ascii_whitespace()
}

/// Finds the next token at or after `pos`.  A token touching the end of the input is only
/// complete once `eof` is set, since more of it may still arrive.
fn next_token(input: &[u8], mut pos: usize, eof: bool) -> Result<Argument, ParseError> {
    while pos < input.len() && is_separator(input[pos]) {
        pos += 1;
    }
    if pos >= input.len() {
        return Err(ParseError::Incomplete);
    }
    let start = pos;
    while pos < input.len() && !is_separator(input[pos]) {
        pos += 1;
    }
    if pos == input.len() && !eof {
        return Err(ParseError::Incomplete);
    }
    Ok(Argument {
        pos: start,
        len: pos - start,
    })
}

/// Creates a parser from a buffer.
///
/// Returns the tokens of the first command and the number of bytes they span.  Set `eof` when
/// no more data will follow `input`.
///
/// # Examples
///
/// ```
/// # use parser::parse;
/// let s = b"  Add 10\nFirst\n";
/// let (parser, len) = parse(s, false).unwrap();
/// assert_eq!(len, 8);
/// assert_eq!(parser.get_str(0).unwrap(), "Add");
/// assert_eq!(parser.get_i64(1).unwrap(), 10);
/// ```
pub fn parse(input: &[u8], eof: bool) -> Result<(ParsedCommand, usize), ParseError> {
    let keyword = next_token(input, 0, eof)?;
    let mut pos = keyword.pos + keyword.len;
    let operands = arity(&input[keyword.pos..pos]);

    let mut argv = Vec::with_capacity(operands + 1);
    argv.push(keyword);
    for _ in 0..operands {
        let arg = next_token(input, pos, eof)?;
        pos = arg.pos + arg.len;
        argv.push(arg);
    }
    Ok((ParsedCommand::new(input, argv), pos))
}

/// A stream parser
///
/// Data is appended with `feed` as it is read; `next` hands out commands as soon as they are
/// complete.
pub struct Parser {
    data: Vec<u8>,
    pub position: usize,
    eof: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Parser {
        Parser {
            data: vec![],
            position: 0,
            eof: false,
        }
    }

    /// Appends more input.
    pub fn feed(&mut self, data: &[u8]) {
        if self.position > 0 && self.position * 2 >= self.data.len() {
            self.data.drain(..self.position);
            self.position = 0;
        }
        self.data.extend_from_slice(data);
    }

    /// Marks the end of the input; a trailing token no longer waits for a separator.
    pub fn finish(&mut self) {
        self.eof = true;
    }

    pub fn is_incomplete(&self) -> bool {
        match parse(&self.data[self.position..], self.eof) {
            Ok(_) => false,
            Err(e) => e.is_incomplete(),
        }
    }

    /// The next command.  Tokens which do not form a valid command are consumed as well, so
    /// the caller may report the error and carry on.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Command, ParseError> {
        let (r, len) = parse(&self.data[self.position..], self.eof)?;
        self.position += len;
        r.command()
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(
            f,
            "Parser: {:?}",
            String::from_utf8_lossy(&self.data[self.position..])
        )
    }
}
