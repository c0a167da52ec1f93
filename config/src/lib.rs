extern crate logger;
extern crate util;

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Error as IOError;
use std::num::ParseIntError;
use std::path::Path;
use std::str::from_utf8;
use std::str::FromStr;
use std::str::Utf8Error;

use logger::Level;
use util::splitargs;

/// Default prime the checksum is reduced by.
pub const DEFAULT_CHECKSUM_MODULUS: i64 = 999983;
/// Default number of levels allocated for the skiplist sentinels.
pub const DEFAULT_MAX_LEVEL: usize = 32;
/// Hard limit on `max-level`.
pub const LIMIT_MAX_LEVEL: usize = 64;

/// Settings for a run of the command driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub loglevel: Level,
    /// Empty for the standard error.
    pub logfile: String,
    pub checksum_modulus: i64,
    pub max_level: usize,
    /// Seed for the level generator.  `None` draws one from the operating system.
    pub seed: Option<u64>,
    /// Rebalance the list once the input is consumed.
    pub rebuild_on_end: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFormat,
    InvalidParameter,
    IOError(IOError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::InvalidFormat => f.write_str("invalid configuration format"),
            ConfigError::InvalidParameter => f.write_str("invalid configuration parameter"),
            ConfigError::IOError(ref e) => write!(f, "cannot read configuration: {}", e),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ConfigError::IOError(ref e) => Some(e),
            _ => None,
        }
    }
}

fn read_string(args: Vec<Vec<u8>>) -> Result<String, ConfigError> {
    if args.len() != 2 {
        Err(ConfigError::InvalidFormat)
    } else {
        Ok(from_utf8(&*args[1])?.to_owned())
    }
}

fn read_parse<T>(args: Vec<Vec<u8>>) -> Result<T, ConfigError>
where
    T: FromStr,
{
    let s = read_string(args)?;
    match s.parse() {
        Ok(f) => Ok(f),
        Err(_) => Err(ConfigError::InvalidParameter),
    }
}

fn read_bool(args: Vec<Vec<u8>>) -> Result<bool, ConfigError> {
    Ok(match &*read_string(args)? {
        "yes" => true,
        "no" => false,
        _ => return Err(ConfigError::InvalidFormat),
    })
}

impl Config {
    pub fn new() -> Config {
        Config {
            loglevel: Level::Notice,
            logfile: "".to_owned(),
            checksum_modulus: DEFAULT_CHECKSUM_MODULUS,
            max_level: DEFAULT_MAX_LEVEL,
            seed: None,
            rebuild_on_end: false,
        }
    }

    /// Reads `directive value` lines from `fname`, overriding the current settings.  Blank lines
    /// and lines starting with `#` are skipped; `include` parses another file in place.
    pub fn parsefile(&mut self, fname: String) -> Result<(), ConfigError> {
        let path = Path::new(&*fname);
        let file = BufReader::new(File::open(&path)?);
        for line_iter in file.lines() {
            let lline = line_iter?;
            self.parseline(lline.trim())?;
        }

        Ok(())
    }

    fn parseline(&mut self, line: &str) -> Result<(), ConfigError> {
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let args = match splitargs(line.as_bytes()) {
            Ok(args) => args,
            Err(_) => return Err(ConfigError::InvalidFormat),
        };
        if args.is_empty() {
            return Ok(());
        }
        match &*args[0] {
            b"loglevel" => {
                self.loglevel = match read_parse(args) {
                    Ok(level) => level,
                    Err(_) => return Err(ConfigError::InvalidParameter),
                }
            }
            b"logfile" => self.logfile = read_string(args)?,
            b"checksum-modulus" => {
                let modulus: i64 = read_parse(args)?;
                if modulus <= 0 {
                    return Err(ConfigError::InvalidParameter);
                }
                self.checksum_modulus = modulus;
            }
            b"max-level" => {
                let max_level: usize = read_parse(args)?;
                if max_level == 0 || max_level > LIMIT_MAX_LEVEL {
                    return Err(ConfigError::InvalidParameter);
                }
                self.max_level = max_level;
            }
            b"seed" => self.seed = Some(read_parse(args)?),
            b"rebuild-on-end" => self.rebuild_on_end = read_bool(args)?,
            b"include" => {
                if args.len() != 2 {
                    return Err(ConfigError::InvalidFormat);
                } else {
                    self.parsefile(from_utf8(&*args[1])?.to_owned())?;
                }
            }
            _ => return Err(ConfigError::InvalidFormat),
        };
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

impl From<IOError> for ConfigError {
    fn from(e: IOError) -> ConfigError {
        ConfigError::IOError(e)
    }
}

impl From<ParseIntError> for ConfigError {
    fn from(_: ParseIntError) -> ConfigError {
        ConfigError::InvalidParameter
    }
}

impl From<Utf8Error> for ConfigError {
    fn from(_: Utf8Error) -> ConfigError {
        ConfigError::InvalidParameter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::random;
    use std::fs::create_dir_all;
    use std::fs::File;
    use std::io::Write;

    use util::mstime;

    fn write_config(contents: &[u8]) -> String {
        let dirpath = format!("tmp/{}", mstime());
        let filepath = format!("{}/{}.conf", dirpath, random::<u64>());
        create_dir_all(&dirpath).unwrap();
        File::create(&filepath).unwrap().write_all(contents).unwrap();
        filepath
    }

    macro_rules! config {
        ($str: expr) => {{
            let mut config = Config::new();
            config.parsefile(write_config($str)).unwrap();
            config
        }};
    }

    macro_rules! config_err {
        ($str: expr) => {{
            let mut config = Config::new();
            config.parsefile(write_config($str)).unwrap_err()
        }};
    }

    #[test]
    fn defaults() {
        let config = config!(b"");
        assert_eq!(config, Config::new());
        assert_eq!(config.loglevel, Level::Notice);
        assert_eq!(config.checksum_modulus, 999983);
        assert_eq!(config.max_level, 32);
        assert_eq!(config.seed, None);
        assert!(!config.rebuild_on_end);
    }

    #[test]
    fn parse_loglevel() {
        let config = config!(b"loglevel debug");
        assert_eq!(config.loglevel, Level::Debug);
        match config_err!(b"loglevel loud") {
            ConfigError::InvalidParameter => (),
            e => panic!("Unexpected error {:?}", e),
        }
    }

    #[test]
    fn parse_logfile() {
        let config = config!(b"logfile \"/tmp/skip index.log\"");
        assert_eq!(config.logfile, "/tmp/skip index.log");
    }

    #[test]
    fn parse_checksum_modulus() {
        let config = config!(b"checksum-modulus 1000003");
        assert_eq!(config.checksum_modulus, 1000003);
        match config_err!(b"checksum-modulus 0") {
            ConfigError::InvalidParameter => (),
            e => panic!("Unexpected error {:?}", e),
        }
    }

    #[test]
    fn parse_max_level() {
        let config = config!(b"max-level 16");
        assert_eq!(config.max_level, 16);
        match config_err!(b"max-level 65") {
            ConfigError::InvalidParameter => (),
            e => panic!("Unexpected error {:?}", e),
        }
    }

    #[test]
    fn parse_seed_quotes() {
        let config = config!(b"seed \"1234\"");
        assert_eq!(config.seed, Some(1234));
    }

    #[test]
    fn parse_rebuild_on_end() {
        assert!(config!(b"rebuild-on-end yes").rebuild_on_end);
        assert!(!config!(b"rebuild-on-end no").rebuild_on_end);
        match config_err!(b"rebuild-on-end maybe") {
            ConfigError::InvalidFormat => (),
            e => panic!("Unexpected error {:?}", e),
        }
    }

    #[test]
    fn comments_and_blank_lines() {
        let config = config!(b"# a comment\n\n   \nseed 7\n  # indented comment\n");
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn include() {
        let included = write_config(b"max-level 8\nseed 99");
        let config = config!(format!("loglevel warning\ninclude {}\nseed 100", included).as_bytes());
        assert_eq!(config.loglevel, Level::Warning);
        assert_eq!(config.max_level, 8);
        assert_eq!(config.seed, Some(100));
    }

    #[test]
    fn unknown_directive() {
        match config_err!(b"port 6379") {
            ConfigError::InvalidFormat => (),
            e => panic!("Unexpected error {:?}", e),
        }
    }

    #[test]
    fn missing_argument() {
        match config_err!(b"seed") {
            ConfigError::InvalidFormat => (),
            e => panic!("Unexpected error {:?}", e),
        }
    }

    #[test]
    fn missing_file() {
        let mut config = Config::new();
        match config.parsefile("tmp/does/not/exist.conf".to_owned()) {
            Err(ConfigError::IOError(_)) => (),
            r => panic!("Unexpected result {:?}", r),
        }
    }
}
