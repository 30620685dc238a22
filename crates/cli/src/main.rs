use std::process::ExitCode;

fn main() -> ExitCode {
    advisor_cli::run()
}
