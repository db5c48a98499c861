use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use registrar_cli::{admin, seeder};
use registrar_config::{DatabaseConfig, PasswordConfig};
use registrar_db::{PgStore, init_db_pool, run_migrations};
use registrar_models::CreateUserDto;

#[derive(Parser)]
#[command(name = "registrar-cli")]
#[command(about = "Registrar CLI - Administrative tools for Registrar", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Role label stored on the account
        #[arg(short = 'r', long)]
        role: Option<String>,
    },
    /// Seed the database with fake students
    SeedStudents {
        /// Number of students to create
        #[arg(short = 'c', long, default_value = "50")]
        count: usize,
    },
    /// Delete every student record
    ClearStudents,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let database = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&database)?;
    run_migrations(&pool).await?;
    let store = PgStore::new(pool);

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
            role,
        } => handle_create_admin(&store, name, email, password, role).await,
        Commands::SeedStudents { count } => {
            seeder::seed_students(&store, count).await?;
            Ok(())
        }
        Commands::ClearStudents => {
            seeder::clear_students(&store).await?;
            Ok(())
        }
    }
}

async fn handle_create_admin(
    store: &PgStore,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let password_config = PasswordConfig::from_env()?;
    let dto = CreateUserDto {
        email,
        name,
        password,
        role,
    };
    let user = admin::create_admin(store, dto, &password_config).await?;

    println!("\n✅ Admin created successfully!");
    println!("   Id: {}", user.id);
    println!("   Email: {}", user.email);
    println!("   Name: {}", user.name);
    println!("   Role: {}", user.role);
    Ok(())
}
