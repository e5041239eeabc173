use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = study_notes::run() {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
