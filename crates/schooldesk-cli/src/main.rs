use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;
use schooldesk_auth::AuthService;
use schooldesk_cli::accounts::{self, AccountInput};
use schooldesk_cli::seeder::{self, SeedConfig};
use schooldesk_config::SessionConfig;
use schooldesk_db::PgSessionStore;
use schooldesk_models::UserType;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "schooldesk-cli")]
#[command(about = "SchoolDesk CLI - Administrative tools for SchoolDesk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account of any user type
    CreateUser {
        /// ADMIN, TEACHER, STUDENT or PARENT (prompted if omitted)
        #[arg(short = 't', long)]
        user_type: Option<UserType>,

        #[arg(short = 'u', long)]
        username: Option<String>,

        #[arg(short = 'f', long)]
        first_name: Option<String>,

        #[arg(short = 'l', long)]
        last_name: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with grades, classes, users and messages
    Seed {
        #[arg(long, default_value = "6")]
        grades: usize,

        #[arg(long, default_value = "2")]
        classes_per_grade: usize,

        #[arg(long, default_value = "10")]
        teachers: usize,

        #[arg(long, default_value = "20")]
        students_per_class: usize,

        #[arg(long, default_value = "2")]
        messages_per_student: usize,
    },
    /// Delete sessions that have expired
    PurgeSessions,
    /// Clear all seeded data (keeps accounts created with create-user)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match schooldesk_db::init_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {e:#}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::CreateUser {
            user_type,
            username,
            first_name,
            last_name,
            email,
            password,
        } => handle_create_user(&pool, user_type, username, first_name, last_name, email, password).await,
        Commands::Seed {
            grades,
            classes_per_grade,
            teachers,
            students_per_class,
            messages_per_student,
        } => {
            let config = SeedConfig {
                grades,
                classes_per_grade,
                teachers,
                students_per_class,
                messages_per_student,
            };
            handle_seed(&pool, config).await
        }
        Commands::PurgeSessions => handle_purge_sessions(&pool).await,
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

fn prompt(label: &str) -> String {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .unwrap_or_else(|e| fail(&format!("Failed to read {}", label.to_lowercase()), e))
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {context}: {err}");
    std::process::exit(1);
}

#[allow(clippy::too_many_arguments)]
async fn handle_create_user(
    pool: &PgPool,
    user_type: Option<UserType>,
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let user_type = user_type.unwrap_or_else(|| {
        let labels: Vec<_> = UserType::ALL.iter().map(UserType::as_str).collect();
        let idx = Select::new()
            .with_prompt("User type")
            .items(&labels)
            .default(0)
            .interact()
            .unwrap_or_else(|e| fail("Failed to read user type", e));
        UserType::ALL[idx]
    });

    let username = username.unwrap_or_else(|| prompt("Username"));
    let first_name = first_name.unwrap_or_else(|| prompt("First name"));
    let last_name = last_name.unwrap_or_else(|| prompt("Last name"));
    let email = email.or_else(|| {
        Input::<String>::new()
            .with_prompt("Email (optional)")
            .allow_empty(true)
            .interact_text()
            .ok()
    });

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail("Failed to read password", e))
    });

    let input = AccountInput {
        user_type,
        username,
        first_name,
        last_name,
        email,
        password,
    };

    let new_user = input
        .into_new_user()
        .unwrap_or_else(|e| fail("Invalid account", e));

    match accounts::create_user(pool, &new_user).await {
        Ok(id) => {
            println!("\n✅ User created successfully!");
            println!("   ID: {}", id);
            println!("   Username: {}", new_user.username);
            println!("   Type: {}", new_user.user_type);
            println!("   Name: {} {}", new_user.first_name, new_user.last_name);
        }
        Err(e) => fail("Error creating user", e),
    }
}

async fn handle_seed(pool: &PgPool, config: SeedConfig) {
    if let Err(e) = schooldesk_db::run_migrations(pool).await {
        fail("Error running migrations", format!("{e:#}"));
    }

    match seeder::seed_all(pool, config).await {
        Ok(summary) => println!("   {summary:?}"),
        Err(e) => fail("Error seeding database", e),
    }
}

async fn handle_purge_sessions(pool: &PgPool) {
    let store = Arc::new(PgSessionStore::new(pool.clone()));
    let auth = AuthService::new(store, &SessionConfig::from_env());

    match auth.purge_expired().await {
        Ok(purged) => println!("✅ Purged {} expired sessions", purged),
        Err(e) => fail("Error purging sessions", e.error),
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    println!("🗑️  Clearing seeded data...");
    match seeder::clear_seed(pool).await {
        Ok(count) => println!("✅ Cleared {} rows", count),
        Err(e) => fail("Error clearing seed data", e),
    }
}
