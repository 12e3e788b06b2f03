// SPDX-License-Identifier: MPL-2.0
use geotagger::app::{logging, App, Completion, Flags};
use geotagger::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let flags = match Flags::from_env() {
        Ok(flags) => flags,
        Err(e) => {
            eprintln!("{e}\n\n{}", geotagger::app::cli::HELP);
            return ExitCode::from(2);
        }
    };
    logging::init(flags.verbose);

    let app = App::from_flags(&flags);
    let mut stdout = std::io::stdout().lock();
    match app.run(&flags.command, &mut stdout) {
        Ok(Completion::Success) => ExitCode::SUCCESS,
        Ok(Completion::PartialFailure) => ExitCode::from(1),
        Err(Error::Usage(message)) => {
            eprintln!("{message}");
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(1)
        }
    }
}
