use std::{env, io, path::PathBuf, process::ExitCode};

use qword::runner::runner::Runner;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!("qword {} - scanner for the qword scripting language", VERSION);
    println!();
    println!("Usage:");
    println!("  qword                # Start the interactive prompt");
    println!("  qword script.qw      # Scan a file and print its tokens");
    println!("  qword --help         # Show this help");
    println!("  qword --version      # Show the version");
    println!();
    println!("Every line typed at the prompt is scanned on its own. Press Ctrl+D to quit.");
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut runner = Runner::new(io::stdout().lock(), io::stderr().lock());

    let result = match args.as_slice() {
        [flag] if flag == "--help" || flag == "-h" => {
            print_help();
            return ExitCode::SUCCESS;
        }
        [flag] if flag == "--version" || flag == "-V" => {
            println!("qword {}", VERSION);
            return ExitCode::SUCCESS;
        }
        [] => runner.run_prompt(io::stdin().lock()).map(|_| true),
        [file_path] => runner
            .run_file(&PathBuf::from(file_path))
            .map(|status| status.is_success()),
        _ => {
            eprintln!("Usage: qword [script]");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}
