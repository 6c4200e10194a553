use clap::{Parser, Subcommand, ValueEnum};
use docsys_cli::{Session, SessionFile};
use docsys_core::sort::{SortKey, SortOrder, SortState};
use docsys_core::{
    CoreConfig, MongoStore, PrescriptionDraft, PrescriptionService,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "docsys")]
#[command(about = "docsys prescription management CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with your display name
    Login {
        /// Display name supplied by the identity provider
        name: String,
    },
    /// Sign out and clear the cached session
    Logout,
    /// Show who is signed in
    Whoami,
    /// List all prescriptions
    List {
        /// Sort column
        #[arg(long, value_enum)]
        sort_by: Option<SortColumn>,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },
    /// Create a prescription from a JSON payload file
    Create {
        /// Path to the JSON payload
        file: PathBuf,
    },
    /// Replace a prescription with a JSON payload file
    Update {
        /// Prescription id
        id: String,
        /// Path to the JSON payload
        file: PathBuf,
    },
    /// Delete a prescription by id
    Delete {
        /// Prescription id
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortColumn {
    Name,
    Date,
}

impl From<SortColumn> for SortKey {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Name => SortKey::Name,
            SortColumn::Date => SortKey::Date,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let sessions = SessionFile::from_env();

    match cli.command {
        Some(Commands::Login { name }) => {
            let session = Session::new(name);
            sessions.save(&session)?;
            println!("Signed in as {}.", session.display_name);
        }
        Some(Commands::Logout) => {
            sessions.clear()?;
            println!("Signed out.");
        }
        Some(Commands::Whoami) => match sessions.load() {
            Some(session) => println!(
                "{} (signed in {})",
                session.display_name,
                session.signed_in_at.to_rfc3339()
            ),
            None => println!("Not signed in."),
        },
        Some(Commands::List { sort_by, desc }) => {
            require_session(&sessions)?;
            let service = connect_service().await?;
            let mut records = service.list().await?;

            if let Some(column) = sort_by {
                let order = if desc {
                    SortOrder::Descending
                } else {
                    SortOrder::Ascending
                };
                SortState::with(column.into(), order).apply(&mut records);
            }

            if records.is_empty() {
                println!("No prescriptions found.");
            } else {
                for record in records {
                    println!(
                        "ID: {}, Patient: {}, Date: {}, Doctor: {}, Instructions: {}",
                        record.id,
                        record.name,
                        record.date_of_prescription,
                        record.doctor_information,
                        record.instructions
                    );
                }
            }
        }
        Some(Commands::Create { file }) => {
            require_session(&sessions)?;
            let draft = read_draft(&file)?;
            let service = connect_service().await?;
            match service.create(draft).await {
                Ok(record) => println!("Created prescription {}", record.id),
                Err(e) => eprintln!("Error creating prescription: {}", e),
            }
        }
        Some(Commands::Update { id, file }) => {
            require_session(&sessions)?;
            let draft = read_draft(&file)?;
            let service = connect_service().await?;
            match service.update(&id, draft).await {
                Ok(record) => println!(
                    "Updated prescription {} (last updated {})",
                    record.id,
                    record.updated_at.to_rfc3339()
                ),
                Err(e) => eprintln!("Error updating prescription: {}", e),
            }
        }
        Some(Commands::Delete { id }) => {
            require_session(&sessions)?;
            let service = connect_service().await?;
            match service.delete(&id).await {
                Ok(()) => println!("Prescription deleted"),
                Err(e) => eprintln!("Error deleting prescription: {}", e),
            }
        }
        None => {
            println!("No command given. Try `docsys --help`.");
        }
    }

    Ok(())
}

fn require_session(sessions: &SessionFile) -> Result<Session, Box<dyn std::error::Error>> {
    sessions
        .load()
        .ok_or_else(|| "Not signed in. Run `docsys login <name>` first.".into())
}

fn read_draft(path: &PathBuf) -> Result<PrescriptionDraft, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

async fn connect_service() -> Result<PrescriptionService, Box<dyn std::error::Error>> {
    let cfg = CoreConfig::from_env_values(
        std::env::var("DOCSYS_MONGO_URI").ok(),
        std::env::var("DOCSYS_DB").ok(),
        std::env::var("DOCSYS_COLLECTION").ok(),
        std::env::var("DOCSYS_STORE_TIMEOUT_SECS").ok(),
    )?;
    let store = MongoStore::connect(&cfg).await?;
    Ok(PrescriptionService::new(
        Arc::new(store),
        cfg.store_timeout(),
    ))
}
