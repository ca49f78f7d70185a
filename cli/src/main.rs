#[macro_use]
extern crate log;

use std::process;

use clap::{Arg, ArgMatches, Command, crate_version};
use xtrace_wire::XtraceResult;

mod dump;
mod format;

/// Entrypoint for the command-line interface.
fn main() {
    let app = Command::new("xtrace")
        .version(crate_version!())
        .author("Mathieu Poumeyrol <kali@zoy.org>")
        .about("TensorFlow profiler trace toolkit")
        .arg(Arg::new("verbosity").short('v').multiple_occurrences(true).global(true).help(
            "Sets the level of verbosity",
        ))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("dump")
                .about("Prints a profiler trace in human readable form")
                .arg(Arg::new("trace").required(true).help("Serialized XSpace file"))
                .arg(Arg::new("full").long("full").help("Show individual events and their stats"))
                .arg(
                    Arg::new("plane")
                        .long("plane")
                        .takes_value(true)
                        .help("Restrict the dump to the plane with this name"),
                ),
        );
    let matches = app.get_matches();

    // XTRACE_LOG trumps the -v flags
    let level = match matches.occurrences_of("verbosity") {
        0 => "xtrace=warn",
        1 => "xtrace=info",
        2 => "xtrace=debug",
        _ => "xtrace=trace",
    };
    let env = env_logger::Env::new().filter_or("XTRACE_LOG", level);
    env_logger::Builder::from_env(env).format_timestamp_nanos().init();

    if let Err(e) = handle(&matches) {
        error!("{:?}", e);
        process::exit(1)
    }
}

fn handle(matches: &ArgMatches) -> XtraceResult<()> {
    match matches.subcommand() {
        Some(("dump", m)) => dump::handle(m),
        _ => unreachable!("the subcommand is required"),
    }
}
