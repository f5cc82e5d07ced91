//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = voltside_cli::run() {
        eprintln!("voltside: {err}");
        std::process::exit(1);
    }
}
