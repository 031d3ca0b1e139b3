use crate::demo::{run_demo, DemoArgs};
use crate::export::{run_bulk_export, run_single_export, BulkExportArgs, SingleExportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use study_portal::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Study Portal Exports",
    about = "Export student applications as PDF, Excel or CSV reports, or serve them over HTTP",
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
    /// Export applications read from a JSON file
    Export {
        #[command(subcommand)]
        command: ExportCommand,
    },
    /// Export the bundled sample applications in every format
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ExportCommand {
    /// Export one application as pdf, excel or csv
    Application(SingleExportArgs),
    /// Export every application in the file as excel or csv
    Bulk(BulkExportArgs),
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
        Command::Export {
            command: ExportCommand::Application(args),
        } => run_single_export(args),
        Command::Export {
            command: ExportCommand::Bulk(args),
        } => run_bulk_export(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["study-portal-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_single_export_flags() {
        let cli = Cli::try_parse_from([
            "study-portal-api",
            "export",
            "application",
            "--input",
            "apps.json",
            "--format",
            "pdf",
            "--id",
            "A1",
            "--include-documents",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Export {
                command: ExportCommand::Application(args),
            }) => {
                assert_eq!(args.format, "pdf");
                assert_eq!(args.id.as_deref(), Some("A1"));
                assert!(args.include_documents);
                assert!(!args.include_timeline);
            }
            other => panic!("expected single export command, got {other:?}"),
        }
    }

    #[test]
    fn bulk_export_keeps_raw_format() {
        let cli = Cli::try_parse_from([
            "study-portal-api",
            "export",
            "bulk",
            "--input",
            "apps.json",
            "--format",
            "pdf",
        ])
        .expect("format validation happens in the export service");

        assert!(matches!(
            cli.command,
            Some(Command::Export {
                command: ExportCommand::Bulk(_)
            })
        ));
    }
}
