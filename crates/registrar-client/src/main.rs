use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use dialoguer::{Input, Password};
use registrar_client::{ApiClient, AuthCache, ClientError, Session};
use registrar_models::{CreateStudentDto, Student, StudentFilter, StudentStatus, UpdateStudentDto};

#[derive(Parser)]
#[command(name = "registrar-client", version, about = "Registrar terminal client")]
struct Cli {
    /// Server URL
    #[arg(long, env = "REGISTRAR_URL", default_value = "http://localhost:3000")]
    server: String,

    /// Where the signed-in session is stored (default: ~/.registrar/auth.json)
    #[arg(long, env = "REGISTRAR_AUTH_FILE")]
    auth_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the token
    Login {
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show the signed-in user as confirmed by the server
    Whoami,
    /// Show dashboard statistics
    Dashboard,
    /// Manage students
    #[command(subcommand)]
    Students(StudentsCommand),
}

#[derive(Subcommand)]
enum StudentsCommand {
    /// List students, newest first
    List {
        #[arg(long)]
        course: Option<String>,

        /// One of active, pending, suspended, graduated, transferred
        #[arg(long)]
        status: Option<StudentStatus>,
    },
    /// Show one student
    Show { id: i64 },
    /// Add a student
    Add(AddStudent),
    /// Update selected fields of a student
    Update(UpdateStudent),
    /// Delete a student
    Delete { id: i64 },
}

#[derive(Args)]
struct AddStudent {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    course: String,
    /// Enrollment date (YYYY-MM-DD)
    #[arg(long)]
    enrollment_date: NaiveDate,
    #[arg(long)]
    status: Option<StudentStatus>,
    /// Generated by the server when omitted
    #[arg(long)]
    student_id: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Args)]
struct UpdateStudent {
    id: i64,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    course: Option<String>,
    #[arg(long)]
    enrollment_date: Option<NaiveDate>,
    #[arg(long)]
    status: Option<StudentStatus>,
    /// Pass an empty string to have the server generate a new one
    #[arg(long)]
    student_id: Option<String>,
    /// Pass an empty string to clear
    #[arg(long)]
    phone: Option<String>,
    /// Pass an empty string to clear
    #[arg(long)]
    address: Option<String>,
    /// Pass an empty string to clear
    #[arg(long)]
    notes: Option<String>,
}

impl From<AddStudent> for CreateStudentDto {
    fn from(args: AddStudent) -> Self {
        CreateStudentDto {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            course: args.course,
            status: args.status,
            student_id: args.student_id,
            enrollment_date: args.enrollment_date,
            phone: args.phone,
            address: args.address,
            notes: args.notes,
        }
    }
}

impl From<UpdateStudent> for UpdateStudentDto {
    fn from(args: UpdateStudent) -> Self {
        UpdateStudentDto {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            course: args.course,
            status: args.status,
            student_id: args.student_id,
            enrollment_date: args.enrollment_date,
            phone: args.phone.map(clearable),
            address: args.address.map(clearable),
            notes: args.notes.map(clearable),
        }
    }
}

fn clearable(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let auth_path = match cli.auth_file {
        Some(path) => path,
        None => AuthCache::default_path()?,
    };
    let auth = AuthCache::load(&auth_path)
        .with_context(|| format!("Failed to read {}", auth_path.display()))?;
    let session = Session::new(ApiClient::new(&cli.server), auth);

    let result = match cli.command {
        Commands::Login { email, password } => cmd_login(&session, email, password).await,
        Commands::Logout => cmd_logout(&session),
        Commands::Whoami => cmd_whoami(&session).await,
        Commands::Dashboard => cmd_dashboard(&session).await,
        Commands::Students(command) => cmd_students(&session, command).await,
    };

    if let Err(err) = result {
        if let Some(ClientError::Api { errors, .. }) = err.downcast_ref::<ClientError>() {
            for detail in errors {
                eprintln!("  {}: {}", detail.field, detail.message);
            }
        }
        return Err(err);
    }
    Ok(())
}

async fn cmd_login(
    session: &Session,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let user = session.login(&email, &password).await?;
    println!("Signed in as {} <{}>", user.name, user.email);
    Ok(())
}

fn cmd_logout(session: &Session) -> Result<()> {
    session.logout()?;
    println!("Signed out");
    Ok(())
}

async fn cmd_whoami(session: &Session) -> Result<()> {
    let user = session.verify().await?;
    println!("{} <{}>", user.name, user.email);
    println!("Role: {}", user.role);
    Ok(())
}

async fn cmd_dashboard(session: &Session) -> Result<()> {
    let stats = session.stats(true).await?;
    println!("Total students:       {}", stats.total_students);
    println!("Active courses:       {}", stats.active_courses);
    println!("Pending applications: {}", stats.pending_applications);
    println!("Graduation rate:      {}", stats.graduation_rate);
    Ok(())
}

async fn cmd_students(session: &Session, command: StudentsCommand) -> Result<()> {
    match command {
        StudentsCommand::List { course, status } => {
            let filter = StudentFilter { course, status };
            let students = session.filtered_students(&filter).await?;
            if students.is_empty() {
                println!("No students found");
            }
            for student in &students {
                print_row(student);
            }
            let courses = session.courses().await?;
            if !courses.is_empty() {
                println!("\nCourses: {}", courses.join(", "));
            }
        }
        StudentsCommand::Show { id } => {
            let student = session.student(id).await?;
            print_details(&student);
        }
        StudentsCommand::Add(args) => {
            let student = session.create_student(&args.into()).await?;
            println!("Created {} ({})", student.full_name(), student.student_id);
        }
        StudentsCommand::Update(args) => {
            let id = args.id;
            let student = session.update_student(id, &args.into()).await?;
            println!("Updated {} ({})", student.full_name(), student.student_id);
        }
        StudentsCommand::Delete { id } => {
            let message = session.delete_student(id).await?;
            println!("{message}");
        }
    }
    Ok(())
}

fn print_row(student: &Student) {
    println!(
        "{:>5}  {:<12}  {:<28}  {:<24}  {:<11}  {}",
        student.id,
        student.student_id,
        student.full_name(),
        student.course,
        student.status.as_str(),
        student.enrollment_date
    );
}

fn print_details(student: &Student) {
    println!("{} ({})", student.full_name(), student.student_id);
    println!("  Id:         {}", student.id);
    println!("  Email:      {}", student.email);
    println!("  Course:     {}", student.course);
    println!("  Status:     {}", student.status);
    println!("  Enrolled:   {}", student.enrollment_date);
    println!("  Phone:      {}", student.phone.as_deref().unwrap_or("-"));
    println!("  Address:    {}", student.address.as_deref().unwrap_or("-"));
    println!("  Notes:      {}", student.notes.as_deref().unwrap_or("-"));
    println!("  Updated:    {}", student.updated_at);
}
