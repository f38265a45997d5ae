use clap::Args;
use dispatch_app::database::Db;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    let db = Db::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let migrated = db
        .migrate()
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"));

    db.close().await;

    migrated?;

    println!("migrations applied");

    Ok(())
}
