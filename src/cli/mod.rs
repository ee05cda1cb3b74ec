use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::application::DeliveryService;
use crate::domain::{
    format_date, ClientId, NewClient, Quantities, UnitPrices, VisitDraft, VisitId,
};
use crate::http::{self, AppState};

const DEFAULT_LOG_FILTER: &str = "info,reparto=debug,sqlx=warn";

/// Reparto - delivery route bookkeeping
#[derive(Parser)]
#[command(name = "reparto")]
#[command(about = "Clients, unit prices and daily visits for a small delivery route")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "REPARTO_DATABASE", default_value = "database.db")]
    pub database: String,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database (creates tables if missing)
    Init,

    /// Run the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },

    /// Client registry commands
    #[command(subcommand)]
    Clients(ClientCommands),

    /// Visit ledger commands
    #[command(subcommand)]
    Visits(VisitCommands),
}

#[derive(Subcommand)]
pub enum ClientCommands {
    /// List all clients
    List,

    /// Register a new client
    Add {
        /// Client name
        name: String,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Delivery address
        #[arg(long)]
        address: Option<String>,

        /// Price per fardo
        #[arg(long, default_value_t = 0.0)]
        fardo: f64,

        /// Price per botellon
        #[arg(long, default_value_t = 0.0)]
        botellon: f64,
    },

    /// Show a single client
    Show {
        /// Client ID
        id: ClientId,
    },

    /// Delete a client (its visits are kept)
    Remove {
        /// Client ID
        id: ClientId,
    },
}

#[derive(Subcommand)]
pub enum VisitCommands {
    /// Show today's visits and the daily total
    Today,

    /// Record a visit at the client's current prices
    Record {
        /// Client ID
        client_id: ClientId,

        /// Fardos delivered
        #[arg(long, default_value_t = 0)]
        fardos: i64,

        /// Botellones delivered
        #[arg(long, default_value_t = 0)]
        botellones: i64,

        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Delete a visit
    Remove {
        /// Visit ID
        id: VisitId,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        init_tracing(self.verbose);

        match self.command {
            Commands::Init => {
                DeliveryService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Serve { host, port } => {
                // A store that cannot be opened or migrated never starts the server
                let service = DeliveryService::init(&self.database)
                    .await
                    .with_context(|| format!("Failed to open database {}", self.database))?;
                let addr: SocketAddr = format!("{}:{}", host, port)
                    .parse()
                    .with_context(|| format!("Invalid listen address {}:{}", host, port))?;
                http::serve(AppState::new(service), addr).await?;
            }

            Commands::Clients(cmd) => {
                let service = DeliveryService::init(&self.database).await?;
                run_client_command(&service, cmd).await?;
            }

            Commands::Visits(cmd) => {
                let service = DeliveryService::init(&self.database).await?;
                run_visit_command(&service, cmd).await?;
            }
        }

        Ok(())
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { DEFAULT_LOG_FILTER };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Ignore the error when a subscriber is already installed (e.g. under tests)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

async fn run_client_command(service: &DeliveryService, cmd: ClientCommands) -> Result<()> {
    match cmd {
        ClientCommands::List => {
            let clients = service.list_clients().await?;
            if clients.is_empty() {
                println!("No clients found.");
            } else {
                println!(
                    "{:>5} {:<24} {:<14} {:>10} {:>10}",
                    "ID", "NAME", "PHONE", "FARDO", "BOTELLON"
                );
                println!("{}", "-".repeat(67));
                for client in clients {
                    println!(
                        "{:>5} {:<24} {:<14} {:>10.2} {:>10.2}",
                        client.id,
                        client.name,
                        client.phone.as_deref().unwrap_or("-"),
                        client.price_fardo,
                        client.price_botellon
                    );
                }
            }
        }

        ClientCommands::Add {
            name,
            phone,
            address,
            fardo,
            botellon,
        } => {
            let client = service
                .register_client(NewClient {
                    name,
                    phone,
                    address,
                    prices: UnitPrices::new(fardo, botellon),
                })
                .await?;
            println!("Registered client: {} ({})", client.name, client.id);
        }

        ClientCommands::Show { id } => {
            let client = service.get_client(id).await?;
            println!("Client: {}", client.name);
            println!("  ID:             {}", client.id);
            if let Some(phone) = &client.phone {
                println!("  Phone:          {}", phone);
            }
            if let Some(address) = &client.address {
                println!("  Address:        {}", address);
            }
            println!("  Fardo price:    {:.2}", client.price_fardo);
            println!("  Botellon price: {:.2}", client.price_botellon);
        }

        ClientCommands::Remove { id } => {
            service.delete_client(id).await?;
            println!("Deleted client: {}", id);
        }
    }
    Ok(())
}

async fn run_visit_command(service: &DeliveryService, cmd: VisitCommands) -> Result<()> {
    match cmd {
        VisitCommands::Today => {
            let ledger = service.todays_ledger().await?;
            println!("Visits on {}", format_date(ledger.date));
            if ledger.is_empty() {
                println!("No visits recorded today.");
            } else {
                println!(
                    "{:>5} {:>7} {:>7} {:>9} {:>10}  {}",
                    "ID", "CLIENT", "FARDOS", "BOTELLON", "SUBTOTAL", "NOTE"
                );
                println!("{}", "-".repeat(60));
                for visit in &ledger.visits {
                    println!(
                        "{:>5} {:>7} {:>7} {:>9} {:>10.2}  {}",
                        visit.id,
                        visit.client_id,
                        visit.fardos,
                        visit.botellones,
                        visit.subtotal,
                        visit.note.as_deref().unwrap_or("")
                    );
                }
            }
            println!("Total: {:.2}", ledger.total);
        }

        VisitCommands::Record {
            client_id,
            fardos,
            botellones,
            note,
        } => {
            let draft = VisitDraft {
                client_id,
                quantities: Quantities::new(fardos, botellones),
                note,
            };
            let visit = service.record_visit(draft).await?;
            println!(
                "Recorded visit {} for client {}: subtotal {:.2}",
                visit.id, visit.client_id, visit.subtotal
            );
        }

        VisitCommands::Remove { id } => {
            service.delete_visit(id).await?;
            println!("Deleted visit: {}", id);
        }
    }
    Ok(())
}
