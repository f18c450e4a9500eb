use date_import::ExitStatus;
use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = match date_import::cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // clap would exit with 2, which means "nothing to do" here
            let _ = e.print();
            return if e.use_stderr() {
                ExitStatus::Error.into()
            } else {
                ExitStatus::Success.into()
            };
        }
    };
    app::run(args).into()
}
