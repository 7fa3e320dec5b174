use crate::screening::{run_check, run_roster, CheckArgs, RosterArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use internlink::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "InternLink",
    about = "Run the InternLink candidate service or screen profiles from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate candidate profiles against the PM Internship Scheme rules
    Eligibility {
        #[command(subcommand)]
        command: EligibilityCommand,
    },
}

#[derive(Subcommand, Debug)]
enum EligibilityCommand {
    /// Print the eligibility status of a single JSON profile
    Check(CheckArgs),
    /// Screen every row of a CSV roster and print a tally
    Roster(RosterArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Eligibility {
            command: EligibilityCommand::Check(args),
        } => run_check(args),
        Command::Eligibility {
            command: EligibilityCommand::Roster(args),
        } => run_roster(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["internlink"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn roster_command_accepts_an_evaluation_date() {
        let cli = Cli::try_parse_from([
            "internlink",
            "eligibility",
            "roster",
            "--csv",
            "candidates.csv",
            "--today",
            "2026-10-18",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Eligibility {
                command: EligibilityCommand::Roster(args),
            }) => {
                assert_eq!(args.csv.to_str(), Some("candidates.csv"));
                assert!(args.today.is_some());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let result = Cli::try_parse_from([
            "internlink",
            "eligibility",
            "check",
            "--profile",
            "asha.json",
            "--today",
            "18/10/2026",
        ]);
        assert!(result.is_err());
    }
}
