extern crate command;
extern crate config;
#[macro_use(log)]
extern crate logger;

use std::env::args;
use std::fs::File;
use std::io::{stdin, BufReader};
use std::process::exit;

use command::{CommandError, Executor, Summary};
use config::Config;
use logger::Logger;

fn usage() -> ! {
    eprintln!("Usage: skipindex [input|-] [config]");
    exit(1);
}

fn run(executor: &mut Executor, input: Option<&str>) -> Result<Summary, CommandError> {
    match input {
        None | Some("-") => {
            let stdin = stdin();
            let lock = stdin.lock();
            executor.run(lock)
        }
        Some(path) => executor.run(BufReader::new(File::open(path)?)),
    }
}

fn main() {
    let mut argv = args().skip(1);
    let input = argv.next();
    let mut config = Config::new();
    if let Some(path) = argv.next() {
        if let Err(e) = config.parsefile(path.clone()) {
            eprintln!("Cannot load configuration {}: {}", path, e);
            exit(1);
        }
    }
    if argv.next().is_some() {
        usage();
    }

    let mut logger = Logger::new_err(config.loglevel);
    if !config.logfile.is_empty() {
        if let Err(e) = logger.set_logfile(&config.logfile) {
            eprintln!("Cannot open log file {}: {}", config.logfile, e);
            exit(1);
        }
    }
    log!(
        logger,
        Notice,
        "skipindex {} reading {} (max-level {}, checksum-modulus {})",
        env!("CARGO_PKG_VERSION"),
        input.as_ref().map(|s| &s[..]).unwrap_or("stdin"),
        config.max_level,
        config.checksum_modulus
    );

    let mut executor = Executor::new(&config, logger.clone());
    let summary = match run(&mut executor, input.as_ref().map(|s| &s[..])) {
        Ok(summary) => summary,
        Err(e) => {
            log!(logger, Warning, "{}", e);
            logger.flush();
            exit(1);
        }
    };
    logger.flush();

    println!("{}", summary.checksum);
    println!("Time: {} msec.", summary.elapsed_ms);
}
