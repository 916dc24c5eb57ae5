// wordcount - keeps track of how many words you write
//
// This is the main entry point. Parses CLI args, opens the database and
// hands off to either a single command or the interactive prompt.

use clap::Parser;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;
use wordcount_lib::{
    cli::{exit_status, Cli, Dispatcher, Repl},
    config::Config,
    logging, Database,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Bad arguments exit here with clap's own status code
    let cli = Cli::parse();

    let result = run(cli).await;
    ExitCode::from(exit_status(&result, &mut io::stderr()))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    logging::init(&config.log_level);

    let db_path = cli.database.unwrap_or(config.database_path);
    let format = cli.output.unwrap_or(config.output);

    let db = Arc::new(Database::connect(&db_path).await?);
    let dispatcher = Dispatcher::new(Arc::clone(&db), format);

    let result = match cli.command {
        Some(command) => dispatcher.dispatch(command, &mut io::stdout()).await,
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            Repl::new(dispatcher, stdin, io::stdout()).run().await
        }
    };

    // Release the connection whether or not the command worked
    db.close().await;

    Ok(result?)
}
