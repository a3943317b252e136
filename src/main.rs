use std::process::ExitCode;

fn main() -> ExitCode {
    compat_reporter::cli::run()
}
