use clap::Parser;
use colored::Colorize;
use robometrics_core::cli::{self, Cli};
use robometrics_core::exit::RobometricsExit;

fn main() -> RobometricsExit {
    let cli = Cli::parse();

    let result = if let Some(cmd) = cli.command {
        cli::dispatch::execute(cmd)
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(RobometricsExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            RobometricsExit::for_error(&e)
        }
    }
}
