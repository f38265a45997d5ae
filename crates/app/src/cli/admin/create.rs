use clap::Args;
use dispatch_app::{
    auth::{DEFAULT_TOKEN_TTL, PgAuthService},
    database::Db,
    domain::users::{
        PgUsersService, UsersService,
        data::{NewUser, Password},
        records::{Role, UserUuid},
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// Given name
    #[arg(long)]
    username: String,

    /// Family name
    #[arg(long)]
    last_name: String,

    /// Contact phone number
    #[arg(long)]
    phone_number: String,

    /// Login email, unique across all users
    #[arg(long)]
    email: String,

    /// Login password
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let db = Db::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(db.clone(), PgAuthService::new(&db, DEFAULT_TOKEN_TTL));

    let created = service
        .register(NewUser {
            uuid: UserUuid::new(),
            username: args.username,
            last_name: args.last_name,
            phone_number: args.phone_number,
            email: args.email,
            password: Password::new(args.password),
            role: Role::Admin,
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"));

    db.close().await;

    let admin = created?;

    println!("admin_id: {}", admin.id);
    println!("admin_uuid: {}", admin.uuid);
    println!("admin_email: {}", admin.email);

    Ok(())
}
