use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use sea_orm_migration::{
    sea_orm::{ActiveValue, Database, DatabaseConnection, DbErr, EntityTrait, TransactionTrait},
    seaql_migrations, MigrationName,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "migrate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Apply and roll back AlgoLearn schema migrations", long_about = None)]
struct Cli {
    /// Database connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending migrations, all of them unless N is given
    Up { n: Option<u32> },
    /// Roll back applied migrations, only the last one unless N is given
    Down { n: Option<u32> },
    /// Mark every migration up to and including VERSION as applied without running it
    Force { version: String },
    /// Print the latest applied migration
    Version,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        tracing::error!("migration failed: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), DbErr> {
    let db = Database::connect(&cli.database_url).await?;

    match cli.command {
        Command::Up { n } => {
            Migrator::up(&db, n).await?;
            tracing::info!("migrations applied");
        }
        Command::Down { n } => {
            Migrator::down(&db, Some(n.unwrap_or(1))).await?;
            tracing::info!("migrations rolled back");
        }
        Command::Force { version } => {
            force(&db, &version).await?;
            tracing::info!("forced migration version to {}", version);
        }
        Command::Version => {
            let applied = Migrator::get_applied_migrations(&db).await?;
            match applied.last() {
                Some(migration) => println!("{}", migration.name()),
                None => println!("none"),
            }
        }
    }

    Ok(())
}

/// Rewrites the bookkeeping table so that exactly the migrations up to
/// `version` are recorded as applied.
async fn force(db: &DatabaseConnection, version: &str) -> Result<(), DbErr> {
    let names: Vec<String> = Migrator::migrations()
        .iter()
        .map(|migration| migration.name().to_string())
        .collect();

    let position = names
        .iter()
        .position(|name| name == version)
        .ok_or_else(|| DbErr::Custom(format!("unknown migration version: {}", version)))?;

    Migrator::install(db).await?;

    let applied_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default();

    let rows = names[..=position]
        .iter()
        .map(|name| seaql_migrations::ActiveModel {
            version: ActiveValue::Set(name.clone()),
            applied_at: ActiveValue::Set(applied_at),
        });

    let txn = db.begin().await?;
    seaql_migrations::Entity::delete_many().exec(&txn).await?;
    seaql_migrations::Entity::insert_many(rows).exec(&txn).await?;
    txn.commit().await?;

    Ok(())
}
