use std::path::PathBuf;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, Command};
use jack_compiler::driver::{self, Options};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = Command::new("jackc")
        .about("Compile Jack classes to VM code")
        .arg(
            Arg::new("input")
                .help("A .jack file or a directory of .jack files")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("xml")
                .long("xml")
                .help("Also write the parse tree as <Name>.xml")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Also write the token list as <Name>T.xml")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .value_name("DIR")
                .help("Write outputs to DIR instead of next to the sources")
                .value_parser(value_parser!(PathBuf)),
        )
        .get_matches();

    let input = matches
        .get_one::<PathBuf>("input")
        .context("missing input path")?;
    let options = Options {
        xml: matches.get_flag("xml"),
        tokens: matches.get_flag("tokens"),
        out_dir: matches.get_one::<PathBuf>("out-dir").cloned(),
    };
    let outputs = driver::run(input, &options)?;
    log::info!("compiled {} files", outputs.len());
    return Ok(());
}
