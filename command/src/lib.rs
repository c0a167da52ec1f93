#[macro_use(log)]
extern crate logger;
extern crate config;
extern crate parser;
extern crate response;
extern crate skiplist;
extern crate util;

use std::convert::TryFrom;
use std::error::Error;
use std::fmt;
use std::io::{self, Read};

use config::Config;
use logger::Logger;
use parser::{Command, ParseError, Parser};
use response::Response;
use skiplist::{GeometricalLevelGenerator, OrderedSkipList, SkipListError};
use util::Stopwatch;

/// Bytes requested from the input at a time.
const READ_CHUNK: usize = 64 * 1024;

/// Probability for a node to reach each additional level.
const LEVEL_PROBABILITY: f64 = 0.5;

/// The list commands operate on.
pub type Index = OrderedSkipList<i64>;

/// Why a command or a run could not be completed.
#[derive(Debug)]
pub enum CommandError {
    /// The input did not contain a valid command.
    Parse(ParseError),
    /// The list refused the operation.
    SkipList(SkipListError),
    /// `Get` was given a position that is not an index at all.
    InvalidIndex(i64),
    IOError(io::Error),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CommandError::Parse(ref e) => write!(f, "{}", e),
            CommandError::SkipList(ref e) => write!(f, "{}", e),
            CommandError::InvalidIndex(index) => write!(f, "index {} out of range", index),
            CommandError::IOError(ref e) => write!(f, "cannot read input: {}", e),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            CommandError::Parse(ref e) => Some(e),
            CommandError::SkipList(ref e) => Some(e),
            CommandError::IOError(ref e) => Some(e),
            CommandError::InvalidIndex(_) => None,
        }
    }
}

impl From<ParseError> for CommandError {
    fn from(e: ParseError) -> CommandError {
        CommandError::Parse(e)
    }
}

impl From<SkipListError> for CommandError {
    fn from(e: SkipListError) -> CommandError {
        CommandError::SkipList(e)
    }
}

impl From<io::Error> for CommandError {
    fn from(e: io::Error) -> CommandError {
        CommandError::IOError(e)
    }
}

/// Running sum of the command results, reduced by a modulus after every step.
///
/// The reduction keeps the sign of the sum, and the sum itself wraps on overflow.
///
/// # Examples
///
/// ```
/// # use command::Checksum;
/// #
/// let mut checksum = Checksum::new(7);
/// checksum.add(10);
/// assert_eq!(checksum.value(), 3);
/// checksum.add(-20);
/// assert_eq!(checksum.value(), -3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checksum {
    modulus: i64,
    value: i64,
}

impl Checksum {
    /// # Panics
    ///
    /// Panics if `modulus` is not positive.
    pub fn new(modulus: i64) -> Checksum {
        assert!(modulus > 0, "checksum modulus must be positive");
        Checksum { modulus, value: 0 }
    }

    pub fn add(&mut self, term: i64) {
        self.value = self.value.wrapping_add(term) % self.modulus;
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

/// Applies a single command to the list.
///
/// # Examples
///
/// ```
/// # use command::{command, Index};
/// # use parser::Command;
/// # use response::Response;
/// #
/// let mut list = Index::new();
/// assert_eq!(command(Command::Add(3), &mut list).unwrap(), Response::Bool(true));
/// assert_eq!(command(Command::Get(0), &mut list).unwrap(), Response::Integer(3));
/// assert!(command(Command::Get(1), &mut list).is_err());
/// ```
pub fn command(command: Command, list: &mut Index) -> Result<Response, CommandError> {
    Ok(match command {
        Command::Add(x) => list.add(x).into(),
        Command::Remove(x) => list.remove(&x).is_some().into(),
        Command::Contains(x) => list.contains(&x).into(),
        Command::Get(n) => {
            let index = usize::try_from(n).map_err(|_| CommandError::InvalidIndex(n))?;
            Response::Integer(*list.get(index)?)
        }
        Command::First => list.first().cloned().into(),
        Command::Last => list.last().cloned().into(),
        Command::Ceiling(x) => list.ceiling(&x).cloned().into(),
        Command::Floor(x) => list.floor(&x).cloned().into(),
        Command::Rebuild => {
            list.rebuild();
            Response::Nil
        }
        Command::End => Response::Nil,
    })
}

/// What a run went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub checksum: i64,
    /// Commands applied, failed ones included.
    pub commands: usize,
    /// Commands or tokens that could not be applied.
    pub failures: usize,
    /// Whether the input was terminated by `End`.
    pub ended: bool,
    pub elapsed_ms: i64,
}

/// Reads commands from an input, applies them to its list and keeps the checksum.
pub struct Executor {
    list: Index,
    checksum: Checksum,
    logger: Logger,
    rebuild_on_end: bool,
    commands: usize,
    failures: usize,
}

impl Executor {
    pub fn new(config: &Config, logger: Logger) -> Executor {
        let level_generator = match config.seed {
            Some(seed) => {
                GeometricalLevelGenerator::seeded(config.max_level, LEVEL_PROBABILITY, seed)
            }
            None => GeometricalLevelGenerator::new(config.max_level, LEVEL_PROBABILITY),
        };
        Executor {
            list: OrderedSkipList::with_level_generator(level_generator),
            checksum: Checksum::new(config.checksum_modulus),
            logger,
            rebuild_on_end: config.rebuild_on_end,
            commands: 0,
            failures: 0,
        }
    }

    pub fn list(&self) -> &Index {
        &self.list
    }

    pub fn checksum(&self) -> i64 {
        self.checksum.value()
    }

    /// Applies `cmd` and adds its result to the checksum.  A failing command is logged and
    /// contributes nothing.
    pub fn execute(&mut self, cmd: Command) -> Response {
        self.commands += 1;
        let response = match command(cmd, &mut self.list) {
            Ok(response) => response,
            Err(e) => {
                self.failures += 1;
                log!(self.logger, Warning, "{} failed: {}", cmd, e);
                Response::Error(e.to_string())
            }
        };
        log!(self.logger, Debug, "{} => {}", cmd, response);
        if let Some(term) = response.contribution() {
            self.checksum.add(term);
        }
        response
    }

    /// Executes every command in `input` until `End` or the end of the input.  Malformed
    /// commands and unknown keywords are logged and skipped.
    pub fn run<R: Read>(&mut self, mut input: R) -> Result<Summary, CommandError> {
        let watch = Stopwatch::start();
        let mut parser = Parser::new();
        let mut buf = vec![0; READ_CHUNK];
        let mut ended = false;

        'read: loop {
            let len = match input.read(&mut buf) {
                Ok(len) => len,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if len == 0 {
                parser.finish();
            } else {
                parser.feed(&buf[..len]);
            }

            loop {
                match parser.next() {
                    Ok(Command::End) => {
                        ended = true;
                        break 'read;
                    }
                    Ok(cmd) => {
                        self.execute(cmd);
                    }
                    Err(ParseError::Incomplete) => break,
                    Err(e) => {
                        self.failures += 1;
                        log!(self.logger, Warning, "Skipping input: {}", e);
                    }
                }
            }

            if len == 0 {
                break;
            }
        }

        if !ended {
            log!(self.logger, Verbose, "Input ended without End");
        }
        if self.rebuild_on_end {
            self.list.rebuild();
            log!(
                self.logger,
                Verbose,
                "Rebuilt {} elements into {} levels",
                self.list.len(),
                self.list.max_level()
            );
        }

        let summary = Summary {
            checksum: self.checksum(),
            commands: self.commands,
            failures: self.failures,
            ended,
            elapsed_ms: watch.elapsed_ms(),
        };
        log!(
            self.logger,
            Verbose,
            "{} commands, {} failures, {} elements",
            summary.commands,
            summary.failures,
            self.list.len()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod test_command {
    use std::io::Cursor;
    use std::str::from_utf8;
    use std::sync::mpsc::{channel, Receiver};

    use config::Config;
    use logger::{Level, Logger};
    use parser::Command;
    use response::Response;

    use super::{command, Checksum, CommandError, Executor, Index};

    fn executor(config: &Config) -> (Executor, Logger, Receiver<Vec<u8>>) {
        let (tx, rx) = channel();
        let logger = Logger::channel(Level::Warning, tx);
        (Executor::new(config, logger.clone()), logger, rx)
    }

    fn seeded() -> Config {
        let mut config = Config::new();
        config.seed = Some(1);
        config
    }

    fn logged(logger: &Logger, rx: &Receiver<Vec<u8>>) -> Vec<String> {
        logger.flush();
        rx.try_iter()
            .map(|line| from_utf8(&line).unwrap().trim_end().to_owned())
            .collect()
    }

    #[test]
    fn checksum_reduces_every_step() {
        let mut checksum = Checksum::new(999983);
        checksum.add(999980);
        checksum.add(5);
        assert_eq!(checksum.value(), 2);
    }

    #[test]
    fn checksum_wraps() {
        let mut checksum = Checksum::new(i64::max_value());
        checksum.add(i64::max_value() - 1);
        checksum.add(i64::max_value());
        assert_eq!(checksum.value(), (i64::max_value() - 1).wrapping_add(i64::max_value()));
    }

    #[test]
    #[should_panic]
    fn checksum_zero_modulus() {
        Checksum::new(0);
    }

    #[test]
    fn queries_on_empty() {
        let mut list = Index::new();
        for cmd in &[
            Command::First,
            Command::Last,
            Command::Floor(1),
            Command::Ceiling(1),
        ] {
            assert_eq!(command(*cmd, &mut list).unwrap(), Response::Nil);
        }
        assert_eq!(
            command(Command::Remove(1), &mut list).unwrap(),
            Response::Bool(false)
        );
    }

    #[test]
    fn get_out_of_range() {
        let mut list = Index::new();
        list.add(10);
        match command(Command::Get(1), &mut list) {
            Err(CommandError::SkipList(_)) => (),
            r => panic!("Unexpected result {:?}", r),
        }
        match command(Command::Get(-1), &mut list) {
            Err(CommandError::InvalidIndex(-1)) => (),
            r => panic!("Unexpected result {:?}", r),
        }
    }

    #[test]
    fn run_small() {
        let (mut executor, _logger, _rx) = executor(&seeded());
        let input = "Add 5 Add 3 Add 5\nContains 3 Get 0 First Last\nFloor 4 Ceiling 4 Remove 3\nEnd";
        let summary = executor.run(Cursor::new(input)).unwrap();
        assert_eq!(summary.checksum, 23);
        assert_eq!(summary.commands, 10);
        assert_eq!(summary.failures, 0);
        assert!(summary.ended);
        assert_eq!(executor.list().iter().cloned().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn run_stops_at_end() {
        let (mut executor, _logger, _rx) = executor(&seeded());
        let summary = executor
            .run(Cursor::new("Add 1\nEnd\nAdd 2\n"))
            .unwrap();
        assert_eq!(summary.checksum, 1);
        assert_eq!(executor.list().len(), 1);
    }

    #[test]
    fn run_without_end() {
        let (mut executor, _logger, _rx) = executor(&seeded());
        let summary = executor.run(Cursor::new("Add 1 Add 2 Last")).unwrap();
        assert!(!summary.ended);
        assert_eq!(summary.checksum, 4);
    }

    #[test]
    fn run_reports_failures() {
        let (mut executor, logger, rx) = executor(&seeded());
        let summary = executor
            .run(Cursor::new("Add 7 Get 3 Get -2 Push Add x Contains 7 End"))
            .unwrap();
        assert_eq!(summary.checksum, 2);
        assert_eq!(summary.failures, 4);
        assert_eq!(
            logged(&logger, &rx),
            vec![
                "Get 3 failed: index 3 out of range for length 1",
                "Get -2 failed: index -2 out of range",
                "Skipping input: Protocol error: unknown keyword 'Push'",
                "Skipping input: Invalid argument",
            ]
        );
    }

    #[test]
    fn run_with_modulus() {
        let mut config = seeded();
        config.checksum_modulus = 10;
        let (mut executor, _logger, _rx) = executor(&config);
        let summary = executor
            .run(Cursor::new("Add 8 Add 9 First Last End"))
            .unwrap();
        // 1, 2, 2 + 8 = 10 -> 0, 0 + 9 = 9
        assert_eq!(summary.checksum, 9);
    }

    #[test]
    fn rebuild_keyword_and_on_end() {
        let mut config = seeded();
        config.rebuild_on_end = true;
        let (mut executor, _logger, _rx) = executor(&config);
        let mut input = String::new();
        for i in 1..=129 {
            input.push_str(&format!("Add {}\n", i));
        }
        input.push_str("Rebuild Remove 65 Get 63 Get 64\n");
        let summary = executor.run(Cursor::new(input)).unwrap();
        assert_eq!(summary.checksum, 129 + 1 + 64 + 66);
        assert_eq!(executor.list().max_level(), 8);
    }
}
