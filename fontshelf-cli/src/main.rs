//! Binary entrypoint for fontshelf-cli (made by FontLab https://www.fontlab.com/)

fn main() {
    if let Err(err) = fontshelf_cli::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
