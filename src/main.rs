mod ast;
mod driver;
mod lexer;
mod parser;

use std::{
    fs,
    io::{self, Read},
};

use anyhow::{bail, Context};
use clap::{App, Arg, ArgMatches};
use driver::{Driver, Settings};

fn dump_tokens(source: &str) -> anyhow::Result<()> {
    for token in lexer::lex(source)? {
        println!("{:?}", token);
    }
    Ok(())
}

fn run_file(path: &str, matches: &ArgMatches) -> anyhow::Result<()> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read source file {}", path))?;

    if matches.is_present("tokens") {
        return dump_tokens(&source);
    }

    let settings = Settings {
        prompt: false,
        print_ast: matches.is_present("ast"),
    };
    let summary = Driver::new(source.chars(), io::stderr(), settings).run()?;
    eprintln!("{}", summary);
    if summary.errors > 0 {
        bail!("{} failed to parse", path);
    }
    Ok(())
}

fn run_stdin(matches: &ArgMatches) -> anyhow::Result<()> {
    let stdin = io::stdin();

    if matches.is_present("tokens") {
        let mut source = String::new();
        stdin
            .lock()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return dump_tokens(&source);
    }

    // bytes are read one at a time so an interactive session sees each line
    // as soon as it is typed
    let chars = stdin.lock().bytes().map_while(Result::ok).map(char::from);
    let settings = Settings {
        prompt: !matches.is_present("quiet"),
        print_ast: matches.is_present("ast"),
    };
    Driver::new(chars, io::stderr(), settings).run()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let matches = App::new("kaleidoscope")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("INPUT")
                .help("source file to parse, stdin when omitted")
                .index(1),
        )
        .arg(
            Arg::with_name("tokens")
                .long("tokens")
                .help("print the token stream instead of parsing"),
        )
        .arg(
            Arg::with_name("ast")
                .long("ast")
                .help("print every parsed construct"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("do not print the ready> prompt"),
        )
        .get_matches();

    match matches.value_of("INPUT") {
        Some(path) => run_file(path, &matches),
        None => run_stdin(&matches),
    }
}
