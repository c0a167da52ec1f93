use std::fs::create_dir_all;
use std::fs::File;
use std::io::Write;

use rand::random;

use config::{Config, ConfigError};
use logger::Level;
use util::mstime;

macro_rules! config {
    ($str: expr) => {{
        let dirpath = format!("tmp/{}", mstime());
        let filepath = format!("{}/{}.conf", dirpath, random::<u64>());
        create_dir_all(&dirpath).unwrap();
        File::create(&filepath).unwrap().write_all($str).unwrap();
        let mut config = Config::new();
        config.parsefile(filepath).map(|_| config)
    }};
}

#[test]
fn full_file() {
    let config = config!(b"# driver settings\n\
        loglevel verbose\n\
        logfile \"\"\n\
        checksum-modulus 1000003\n\
        max-level 20\n\
        seed 31337\n\
        rebuild-on-end yes\n")
    .unwrap();
    assert_eq!(config.loglevel, Level::Verbose);
    assert_eq!(config.logfile, "");
    assert_eq!(config.checksum_modulus, 1000003);
    assert_eq!(config.max_level, 20);
    assert_eq!(config.seed, Some(31337));
    assert!(config.rebuild_on_end);
}

#[test]
fn later_lines_win() {
    let config = config!(b"seed 1\nseed 2\n").unwrap();
    assert_eq!(config.seed, Some(2));
}

#[test]
fn bad_quotes() {
    match config!(b"logfile \"unterminated\n") {
        Err(ConfigError::InvalidFormat) => (),
        r => panic!("Unexpected result {:?}", r),
    }
}

#[test]
fn bad_number() {
    match config!(b"seed -4\n") {
        Err(ConfigError::InvalidParameter) => (),
        r => panic!("Unexpected result {:?}", r),
    }
}
