use sqlbench::batch::BatchExecutor;
use sqlbench::cli::{self, commands, output, ux, workbench::TerminalWorkbench, Parser};
use sqlbench::db::PostgresEngine;

use std::io::{self, IsTerminal, Write};


async fn run_command(args: cli::Cli) -> output::SqlbenchOutput<serde_json::Value> {
    let mut engine = PostgresEngine::new(&args.db_connection_string);
    let command_name = args.command.to_string();
    let interactive = args.command.is_interactive();

    let script = match args.command {
        cli::Commands::Peck { } => {
            return match commands::peck(&mut engine).await {
                Ok(()) => output::SqlbenchOutput::success(command_name, None),
                Err(e) => output::SqlbenchOutput::failure(command_name, &e),
            };
        }
        cli::Commands::Run { file } | cli::Commands::Import { file } => {
            match commands::read_script(&file) {
                Ok(script) => script,
                Err(e) => return output::SqlbenchOutput::failure(command_name, &e),
            }
        }
        cli::Commands::Exec { sql } => sql,
    };

    // JSON mode keeps stdout for the final document only.
    let out: Box<dyn Write + Send> = if args.json { Box::new(io::sink()) } else { Box::new(io::stdout()) };
    let workbench = TerminalWorkbench::new(out, !args.json && io::stdout().is_terminal());
    let executor = BatchExecutor::new(engine, workbench, args.result_file);

    match commands::run(executor, script, interactive).await {
        Ok((_, report)) => output::SqlbenchOutput::from_report(command_name, &report),
        Err(e) => output::SqlbenchOutput::failure(command_name, &e),
    }
}


/// Entry point for the sqlbench CLI.
///
/// - `peck`: Verify connectivity to the database.
/// - `run`: Execute a script file with success notices.
/// - `import`: Execute a script file silently, e.g. a database dump.
/// - `exec`: Execute statements given on the command line.
#[tokio::main]
async fn main() {
    let args: cli::Cli = cli::Cli::parse();

    if let Err(e) = ux::setup_logging(args.verbose, args.quiet, args.json) {
        eprintln!("{e}");
    }

    let json = args.json;
    let result = run_command(args).await;

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(document) => println!("{document}"),
            Err(e) => eprintln!("Failed to serialize output: {e}"),
        }
    } else {
        ux::render_human_output(&result);
    }

    if let output::SqlbenchStatus::Error = result.status {
        std::process::exit(1);
    }
}
