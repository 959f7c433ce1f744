use clap::Parser;
use db_infra::{close, connect_admin, DbSettings};
use migration::{migrate, seed_demo_books, MigrationCommand};

#[derive(Parser)]
#[command(name = "migration")]
#[command(about = "Bookshelf database migration tool")]
struct Args {
    /// Migration command to run: up | down | fresh | reset | refresh | status
    command: String,

    /// Insert the demo catalogue when the books table is empty
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,db_infra=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let Some(command) = MigrationCommand::parse(&args.command) else {
        eprintln!(
            "Unknown command: {}. Use: up | down | fresh | reset | refresh | status",
            args.command
        );
        std::process::exit(2);
    };

    if args.seed && !command.leaves_schema() {
        eprintln!("--seed only applies to up, fresh and refresh");
        std::process::exit(2);
    }

    // Same BOOKS_DB_* variables the server reads
    let settings = match DbSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(2);
        }
    };

    let conn = match connect_admin(&settings).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let mut outcome = migrate(&conn, command).await;
    if outcome.is_ok() && args.seed {
        outcome = seed_demo_books(&conn).await.map(|_| ());
    }

    if let Err(e) = close(conn).await {
        tracing::warn!("closing connection failed: {e}");
    }

    if let Err(e) = outcome {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
