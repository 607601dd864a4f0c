use std::process::ExitCode;

fn main() -> ExitCode {
    match graph_stats::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gstat: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
