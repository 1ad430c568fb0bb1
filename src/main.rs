//! Process entry point: scan stdin and print the token stream.

use std::io;
use std::process::ExitCode;

use pslex::Scanner;

fn main() -> ExitCode {
    let stdin = io::stdin();
    let scanner = Scanner::new(stdin.lock());

    for result in scanner {
        match result {
            Ok(token) => println!("{token:?}"),
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
