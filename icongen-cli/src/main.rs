//! Binary entrypoint for icongen-cli.

fn main() {
    if let Err(err) = icongen_cli::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
