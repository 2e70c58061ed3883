use std::env;
use std::fs;
use std::io::Write;

use anyhow::Error;
use clap::{App, AppSettings};
use env_logger::{fmt, Builder, Target};
use log::{error, info};
use log::{Level, LevelFilter, Record};

use chronosat::Solver;

fn main() {
    let exit_code = match main_with_err() {
        Err(err) => {
            error!("{}", err);
            1
        }
        Ok(exit_code) => exit_code,
    };
    std::process::exit(exit_code);
}

fn init_logging() {
    let format = |buf: &mut fmt::Formatter, record: &Record| {
        if record.level() == Level::Info {
            writeln!(buf, "c {}", record.args())
        } else {
            writeln!(buf, "c {}: {}", record.level(), record.args())
        }
    };

    let mut builder = Builder::new();
    builder
        .target(Target::Stdout)
        .format(format)
        .filter(None, LevelFilter::Info);

    if let Ok(ref env_var) = env::var("CHRONOSAT_LOG") {
        builder.parse_filters(env_var);
    }

    builder.init();
}

fn main_with_err() -> Result<i32, Error> {
    let matches = App::new("chronosat")
        .version(env!("CARGO_PKG_VERSION"))
        .setting(AppSettings::DisableHelpSubcommand)
        .arg_from_usage("<INPUT> 'The DIMACS CNF file to solve'")
        .get_matches();

    init_logging();

    let path = matches.value_of("INPUT").unwrap();

    info!("reading file '{}'", path);
    let file = fs::File::open(path)?;

    let mut solver = Solver::new();
    solver.add_dimacs_cnf(file)?;

    if solver.solve() {
        println!("SAT");
    } else {
        println!("UNSAT");
    }

    Ok(0)
}
