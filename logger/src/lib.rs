use std::fmt::{self, Debug, Formatter};
use std::fs::{File, OpenOptions};
use std::io::{self, stderr, stdout, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::mpsc::{channel, Sender};
use std::thread;

/// Macro to log a message. Uses the `format!` syntax.
/// See `std::fmt` for more information.
///
/// # Examples
///
/// ```
/// # #[macro_use(log)]
/// # extern crate logger;
/// # use logger::{Logger, Level};
/// #
/// # fn main() {
/// # let logger = Logger::new(Level::Warning);
/// log!(logger, Debug, "hello {}", "world");
/// # }
/// ```
#[macro_export]
macro_rules! log {
    ($logger: expr, $level: ident, $($arg:tt)*) => ({
        $logger.log($crate::Level::$level, format!($($arg)*))
    })
}

/// Macro to send a message to a `Sender<(Level, String)>`.
/// Uses the `format!` syntax.
/// See `std::fmt` for more information.
///
/// # Examples
///
/// ```
/// # #[macro_use(sendlog)]
/// # extern crate logger;
/// # use logger::{Logger, Level};
/// # use std::sync::mpsc::channel;
/// #
/// # fn main() {
/// # let (tx, rx) = channel();
/// # let logger = Logger::channel(Level::Debug, tx);
/// # let sender = logger.sender();
/// sendlog!(sender, Debug, "hello {}", "world").unwrap();
/// # assert_eq!(rx.recv().unwrap(), b"hello world\n");
/// # }
/// ```
#[macro_export]
macro_rules! sendlog {
    ($sender: expr, $level: ident, $($arg:tt)*) => ({
        $sender.send(($crate::Level::$level, format!($($arg)*)))
    })
}

enum Output {
    /// Sends logs to a channel
    Channel(Sender<Vec<u8>>),
    /// Writes to the standard output
    Stdout,
    /// Writes to the standard error
    Stderr,
    /// Writes to a `File` in `String` path
    File(File, String),
}

impl Output {
    fn open(path: &str) -> io::Result<Output> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(Path::new(path))?;
        Ok(Output::File(file, path.to_owned()))
    }
}

impl Debug for Output {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Output::Channel(_) => fmt.write_str("Channel"),
            Output::Stderr => fmt.write_str("Stderr"),
            Output::Stdout => fmt.write_str("Stdout"),
            Output::File(_, ref filename) => write!(fmt, "File: {}", filename),
        }
    }
}

impl Write for Output {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        match *self {
            Output::Channel(ref v) => match v.send(data.to_vec()) {
                Ok(()) => Ok(data.len()),
                Err(_) => Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "log channel closed",
                )),
            },
            Output::Stderr => stderr().write(data),
            Output::Stdout => stdout().write(data),
            Output::File(ref mut v, _) => v.write(data),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match *self {
            Output::Channel(_) => Ok(()),
            Output::Stderr => stderr().flush(),
            Output::Stdout => stdout().flush(),
            Output::File(ref mut v, _) => v.flush(),
        }
    }
}

/// A level that identifies a log message.
/// A lower level includes all higher levels.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Level {
    Debug,
    Verbose,
    Notice,
    Warning,
}

impl Level {
    /// Whether the level is equal or lower than another level.
    /// For example, `Debug` includes all other levels, while `Warning` only
    /// includes itself.
    ///
    /// # Examples
    ///
    /// ```
    /// # use logger::Level;
    /// #
    /// assert!(Level::Debug.contains(&Level::Debug));
    /// assert!(!Level::Warning.contains(&Level::Debug));
    /// assert!(Level::Debug.contains(&Level::Warning));
    /// ```
    pub fn contains(&self, other: &Level) -> bool {
        match *self {
            Level::Debug => true,
            Level::Verbose => *other != Level::Debug,
            Level::Notice => *other == Level::Notice || *other == Level::Warning,
            Level::Warning => *other == Level::Warning,
        }
    }

    fn name(&self) -> &'static str {
        match *self {
            Level::Debug => "debug",
            Level::Verbose => "verbose",
            Level::Notice => "notice",
            Level::Warning => "warning",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a level from its lowercase name.
///
/// # Examples
///
/// ```
/// # use logger::Level;
/// #
/// assert_eq!("verbose".parse::<Level>(), Ok(Level::Verbose));
/// assert!("loud".parse::<Level>().is_err());
/// ```
impl FromStr for Level {
    type Err = ();

    fn from_str(s: &str) -> Result<Level, ()> {
        match s {
            "debug" => Ok(Level::Debug),
            "verbose" => Ok(Level::Verbose),
            "notice" => Ok(Level::Notice),
            "warning" => Ok(Level::Warning),
            _ => Err(()),
        }
    }
}

/// Requests handled by the writer thread.
enum Message {
    Log(Level, String),
    SetLevel(Level),
    SetOutput(Output),
    /// Acknowledged once every message sent before it has been written.
    Flush(Sender<()>),
}

/// A leveled logger.  Messages are handed to a background thread which filters them by level
/// and writes them to the current output, one per line.
#[derive(Clone)]
pub struct Logger {
    tx: Sender<Message>,
}

impl Logger {
    /// Creates a new `Logger` for a given `Output` and severity `Level`.
    fn create(level: Level, output: Output) -> Logger {
        let (tx, rx) = channel::<Message>();
        let mut level = level;
        let mut output = output;
        thread::spawn(move || {
            for message in rx {
                match message {
                    Message::Log(lvl, msg) => {
                        if !level.contains(&lvl) {
                            continue;
                        }
                        if let Err(e) = writeln!(output, "{}", msg) {
                            // failing to log a message... will write straight to stderr
                            let _ = writeln!(stderr(), "Failed to log {:?} {}", e, msg);
                        }
                    }
                    Message::SetLevel(lvl) => level = lvl,
                    Message::SetOutput(out) => output = out,
                    Message::Flush(ack) => {
                        let _ = output.flush();
                        let _ = ack.send(());
                    }
                }
            }
        });

        Logger { tx }
    }

    /// Creates a new logger that writes in the standard output.
    ///
    /// # Examples
    /// ```
    /// # use logger::{Logger, Level};
    /// #
    /// let logger = Logger::new(Level::Warning);
    /// logger.log(Level::Warning, "hello world".to_owned());
    /// ```
    pub fn new(level: Level) -> Self {
        Self::create(level, Output::Stdout)
    }

    /// Creates a new logger that writes in the standard error.
    ///
    /// # Examples
    /// ```
    /// # use logger::{Logger, Level};
    /// #
    /// let logger = Logger::new_err(Level::Warning);
    /// logger.log(Level::Warning, "hello world".to_owned());
    /// ```
    pub fn new_err(level: Level) -> Self {
        Self::create(level, Output::Stderr)
    }

    /// Creates a new logger that sends log messages to `s`.
    ///
    /// # Examples
    /// ```
    /// # use logger::{Logger, Level};
    /// # use std::sync::mpsc::channel;
    /// #
    /// let (tx, rx) = channel();
    /// let logger = Logger::channel(Level::Debug, tx);
    /// logger.log(Level::Debug, "hello world".to_owned());
    /// assert_eq!(rx.recv().unwrap(), b"hello world\n".to_vec());
    /// ```
    pub fn channel(level: Level, s: Sender<Vec<u8>>) -> Self {
        Self::create(level, Output::Channel(s))
    }

    /// Creates a new logger that appends to a file.
    pub fn file(level: Level, path: &str) -> io::Result<Self> {
        Ok(Self::create(level, Output::open(path)?))
    }

    /// Changes the output to be a file in `path`.
    pub fn set_logfile(&mut self, path: &str) -> io::Result<()> {
        let output = Output::open(path)?;
        self.send(Message::SetOutput(output));
        Ok(())
    }

    /// Changes the log level.
    pub fn set_loglevel(&mut self, level: Level) {
        self.send(Message::SetLevel(level));
    }

    /// Creates a new sender to log messages.
    pub fn sender(&self) -> Sender<(Level, String)> {
        let (tx, rx) = channel();
        let tx2 = self.tx.clone();
        thread::spawn(move || {
            for (level, message) in rx {
                if tx2.send(Message::Log(level, message)).is_err() {
                    break;
                }
            }
        });
        tx
    }

    /// Logs a message with a log level.
    pub fn log(&self, level: Level, msg: String) {
        self.send(Message::Log(level, msg));
    }

    /// Blocks until every message logged so far has been written out.
    pub fn flush(&self) {
        let (tx, rx) = channel();
        self.send(Message::Flush(tx));
        let _ = rx.recv();
    }

    fn send(&self, message: Message) {
        // The writer thread only stops once every `Logger` is gone.
        let _ = self.tx.send(message);
    }
}

#[cfg(test)]
mod test_log {
    use super::{Level, Logger};
    use std::fs::{create_dir_all, remove_file, File};
    use std::io::Read;
    use std::sync::mpsc::{channel, TryRecvError};

    #[test]
    fn log_levels() {
        assert!(Level::Debug.contains(&Level::Debug));
        assert!(Level::Debug.contains(&Level::Verbose));
        assert!(Level::Debug.contains(&Level::Notice));
        assert!(Level::Debug.contains(&Level::Warning));

        assert!(!Level::Verbose.contains(&Level::Debug));
        assert!(Level::Verbose.contains(&Level::Verbose));
        assert!(Level::Verbose.contains(&Level::Notice));
        assert!(Level::Verbose.contains(&Level::Warning));

        assert!(!Level::Notice.contains(&Level::Debug));
        assert!(!Level::Notice.contains(&Level::Verbose));
        assert!(Level::Notice.contains(&Level::Notice));
        assert!(Level::Notice.contains(&Level::Warning));

        assert!(!Level::Warning.contains(&Level::Debug));
        assert!(!Level::Warning.contains(&Level::Verbose));
        assert!(!Level::Warning.contains(&Level::Notice));
        assert!(Level::Warning.contains(&Level::Warning));
    }

    #[test]
    fn level_names() {
        for level in &[Level::Debug, Level::Verbose, Level::Notice, Level::Warning] {
            assert_eq!(level.to_string().parse::<Level>(), Ok(*level));
        }
        assert_eq!("DEBUG".parse::<Level>(), Err(()));
    }

    #[test]
    fn log_something() {
        let (tx, rx) = channel();
        let logger = Logger::channel(Level::Debug, tx);
        logger.log(Level::Debug, "hello world".to_owned());
        assert_eq!(rx.recv().unwrap(), b"hello world\n");
    }

    #[test]
    fn dont_log_something() {
        let (tx, rx) = channel();
        let logger = Logger::channel(Level::Warning, tx);
        logger.log(Level::Debug, "hello world".to_owned());
        logger.flush();
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn change_level() {
        let (tx, rx) = channel();
        let mut logger = Logger::channel(Level::Warning, tx);
        logger.set_loglevel(Level::Debug);
        logger.log(Level::Debug, "now visible".to_owned());
        assert_eq!(rx.recv().unwrap(), b"now visible\n");
    }

    #[test]
    fn test_macro() {
        let (tx, rx) = channel();
        let logger = Logger::channel(Level::Debug, tx);
        log!(logger, Debug, "hello {}", "world");
        assert_eq!(rx.recv().unwrap(), b"hello world\n");
    }

    #[test]
    fn test_sender() {
        let (tx, rx) = channel();
        let logger = Logger::channel(Level::Debug, tx);
        let sender = logger.sender();
        sendlog!(sender, Notice, "hello {}", 42).unwrap();
        assert_eq!(rx.recv().unwrap(), b"hello 42\n");
    }

    #[test]
    fn log_to_file() {
        create_dir_all("tmp").unwrap();
        let path = "tmp/logger-file.log";
        let _ = remove_file(path);
        let logger = Logger::file(Level::Notice, path).unwrap();
        log!(logger, Notice, "first");
        log!(logger, Debug, "hidden");
        log!(logger, Warning, "second");
        logger.flush();

        let mut contents = String::new();
        File::open(path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "first\nsecond\n");
        remove_file(path).unwrap();
    }
}
