//! Gearloan command-line front end
//!
//! A thin presentation layer over [`CheckoutApp`]: every subcommand signs in,
//! runs one operation and prints the outcome.

use std::io::{BufRead, Write};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gearloan::{
    config::AppConfig,
    models::{EquipmentDraft, Registration, Role},
    ports::{Confirmation, FixedConfirmation, Notification, NotificationLevel, Notifier},
    repository::Repository,
    services::Services,
    CheckoutApp, Session,
};

#[derive(Parser)]
#[command(name = "gearloan")]
#[command(about = "Sports equipment checkout tracker")]
#[command(version)]
struct Cli {
    /// Override the configured data directory
    #[arg(long)]
    data_dir: Option<std::path::PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Credentials {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long)]
    password: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default settings and migrate legacy users
    Init,

    /// Create an account
    Register {
        #[command(flatten)]
        credentials: Credentials,

        /// Register as admin (requires --admin-code)
        #[arg(long)]
        admin: bool,

        #[arg(long)]
        admin_code: Option<String>,
    },

    /// List all equipment
    Equipment,

    /// Add equipment (admin)
    Add {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long)]
        name: String,

        /// Category name
        #[arg(long, default_value = "General Equipment")]
        category: String,

        #[arg(long, default_value = "1")]
        total: u32,

        /// Defaults to total
        #[arg(long)]
        avail: Option<u32>,

        #[arg(long, default_value = "")]
        photo: String,
    },

    /// Borrow equipment
    Borrow {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long)]
        id: u64,

        #[arg(long, default_value = "1")]
        quantity: u32,

        /// Proof photo (data URL or path)
        #[arg(long)]
        photo: String,
    },

    /// Return borrowed equipment
    Return {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long)]
        id: u64,

        /// Return proof photo (data URL or path)
        #[arg(long)]
        photo: String,
    },

    /// Show loan history (own history, or everything with --all as admin)
    History {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long)]
        all: bool,
    },

    /// Inventory counters, plus recent activity for admins
    Stats {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Delete equipment (admin)
    Delete {
        #[command(flatten)]
        credentials: Credentials,

        /// Equipment ids
        #[arg(required = true)]
        ids: Vec<u64>,
    },

    /// Set the logo to an icon or an image (admin)
    Logo {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long, conflicts_with = "image", required_unless_present = "image")]
        icon: Option<String>,

        /// Image data URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Set or reset theme colors (admin)
    Colors {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long, requires = "text", conflicts_with = "reset")]
        bg: Option<String>,

        #[arg(long, requires = "bg")]
        text: Option<String>,

        /// Restore the default colors
        #[arg(long)]
        reset: bool,
    },

    /// Manage categories
    Categories {
        #[command(subcommand)]
        command: CategoryCommands,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// List categories
    List,

    /// Add a category (admin)
    Add {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long)]
        name: String,

        #[arg(long)]
        image: Option<String>,
    },

    /// Delete a category (admin)
    Delete {
        #[command(flatten)]
        credentials: Credentials,

        #[arg(long)]
        id: u64,
    },
}

/// Prints notifications to the terminal
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let tag = match notification.level {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
        };
        println!("[{}] {}: {}", tag, notification.title, notification.message);
    }
}

/// Asks on stdin, anything but y/yes declines
struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("gearloan={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn sign_in(app: &CheckoutApp, credentials: &Credentials) -> anyhow::Result<Session> {
    Ok(app.log_in(&credentials.email, &credentials.password).await?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(dir) = cli.data_dir.clone() {
        config.storage.data_dir = dir;
    }

    init_tracing(&config);
    tracing::debug!("Starting Gearloan v{}", env!("CARGO_PKG_VERSION"));

    let repository = Repository::from_config(&config.storage).await?;
    let services = Services::new(repository, &config);
    let confirmation: Arc<dyn Confirmation> = if cli.yes {
        Arc::new(FixedConfirmation(true))
    } else {
        Arc::new(StdinConfirmation)
    };
    let app = CheckoutApp::new(services, Arc::new(ConsoleNotifier), confirmation);

    app.start().await?;

    match cli.command {
        Commands::Init => {
            tracing::info!("Data directory ready at {}", config.storage.data_dir.display());
        }
        Commands::Register {
            credentials,
            admin,
            admin_code,
        } => {
            let user = app
                .sign_up(Registration {
                    email: credentials.email,
                    password: credentials.password,
                    role: if admin { Role::Admin } else { Role::Student },
                    admin_code,
                })
                .await?;
            print_json(&user)?;
        }
        Commands::Equipment => print_json(&app.equipment().await)?,
        Commands::Add {
            credentials,
            name,
            category,
            total,
            avail,
            photo,
        } => {
            let session = sign_in(&app, &credentials).await?;
            let item = app
                .save_equipment(
                    &session,
                    EquipmentDraft {
                        id: None,
                        name,
                        category,
                        total,
                        avail: avail.unwrap_or(total),
                        photo,
                    },
                )
                .await?;
            print_json(&item)?;
        }
        Commands::Borrow {
            credentials,
            id,
            quantity,
            photo,
        } => {
            let session = sign_in(&app, &credentials).await?;
            let log = app.borrow(&session, id, quantity, &photo).await?;
            print_json(&log)?;
        }
        Commands::Return {
            credentials,
            id,
            photo,
        } => {
            let session = sign_in(&app, &credentials).await?;
            let log = app.return_item(&session, id, &photo).await?;
            print_json(&log)?;
        }
        Commands::History { credentials, all } => {
            let session = sign_in(&app, &credentials).await?;
            let logs = if all {
                app.all_history(&session).await?
            } else {
                app.my_history(&session).await
            };
            print_json(&logs)?;
        }
        Commands::Stats { credentials } => {
            let session = sign_in(&app, &credentials).await?;
            print_json(&app.stats().await)?;
            if session.is_admin() {
                print_json(&app.recent_activity(&session).await?)?;
            }
        }
        Commands::Delete { credentials, ids } => {
            let session = sign_in(&app, &credentials).await?;
            let outcome = match ids.as_slice() {
                [id] => app.delete_equipment(&session, *id).await?,
                _ => app.bulk_delete_equipment(&session, &ids).await?,
            };
            if outcome.is_none() {
                println!("Cancelled");
            }
        }
        Commands::Logo {
            credentials,
            icon,
            image,
        } => {
            let session = sign_in(&app, &credentials).await?;
            let settings = match (icon, image) {
                (Some(icon), _) => app.set_icon_logo(&session, &icon).await?,
                (None, Some(image)) => app.set_image_logo(&session, &image).await?,
                (None, None) => anyhow::bail!("either --icon or --image is required"),
            };
            print_json(&settings)?;
        }
        Commands::Colors {
            credentials,
            bg,
            text,
            reset,
        } => {
            let session = sign_in(&app, &credentials).await?;
            let settings = match (bg, text) {
                (Some(bg), Some(text)) if !reset => app.set_colors(&session, &bg, &text).await?,
                _ if reset => app.reset_colors(&session).await?,
                _ => anyhow::bail!("pass --bg and --text, or --reset"),
            };
            print_json(&settings)?;
        }
        Commands::Categories { command } => match command {
            CategoryCommands::List => print_json(&app.settings().await.categories)?,
            CategoryCommands::Add {
                credentials,
                name,
                image,
            } => {
                let session = sign_in(&app, &credentials).await?;
                let category = app.add_category(&session, &name, image.as_deref()).await?;
                print_json(&category)?;
            }
            CategoryCommands::Delete { credentials, id } => {
                let session = sign_in(&app, &credentials).await?;
                if app.delete_category(&session, id).await?.is_none() {
                    println!("Cancelled");
                }
            }
        },
    }

    Ok(())
}
