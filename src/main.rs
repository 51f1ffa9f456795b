use std::process::ExitCode;

use groundwork::ui::output;

fn main() -> ExitCode {
    match groundwork::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
