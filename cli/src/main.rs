use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use client::net::transport::TransportError;
use client::state::session::SessionContext;
use client::state::storage::{FileStore, StoreError};
use client::state::ui::{NotificationLevel, ViewId};
use client::{ApiClient, ClientConfig, Command as StudioCommand, Outcome, Studio};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http client setup failed: {0}")]
    Transport(#[from] TransportError),
    #[error("session store unavailable: {0}")]
    Store(#[from] StoreError),
    #[error("{0} failed")]
    CommandFailed(&'static str),
}

#[derive(Parser, Debug)]
#[command(name = "studio-cli", about = "AI Creative Studio storefront client")]
struct Cli {
    #[arg(long, env = "STUDIO_BASE_URL", default_value = client::config::DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "STUDIO_STORE_PATH", default_value = ".studio/session.json")]
    store: PathBuf,

    #[arg(long, env = "STUDIO_REQUEST_TIMEOUT_SECS", default_value_t = client::config::DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    #[arg(long, env = "STUDIO_CONNECT_TIMEOUT_SECS", default_value_t = client::config::DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        username: String,
        #[arg(long, env = "STUDIO_PASSWORD")]
        password: String,
    },
    Register {
        username: String,
        #[arg(long, env = "STUDIO_PASSWORD")]
        password: String,
        #[arg(long, default_value = "")]
        email: String,
    },
    Logout,
    /// Print the stored account without calling the server.
    Whoami,
    /// Render one storefront section: home, design, gallery, shop, cart, orders.
    View {
        view: ViewId,
        #[arg(long)]
        category: Option<String>,
    },
    Design(DesignCommand),
    Shop(ShopCommand),
    Cart(CartCommand),
    Order(OrderCommand),
    /// Header with the current cart badge.
    Status,
}

#[derive(Args, Debug)]
struct DesignCommand {
    #[command(subcommand)]
    command: DesignSubcommand,
}

#[derive(Subcommand, Debug)]
enum DesignSubcommand {
    Generate {
        prompt: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        style: String,
    },
    Gallery {
        #[arg(long)]
        category: Option<String>,
    },
    Publish {
        #[arg(long)]
        design_id: u64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        price: f64,
    },
}

#[derive(Args, Debug)]
struct ShopCommand {
    #[command(subcommand)]
    command: ShopSubcommand,
}

#[derive(Subcommand, Debug)]
enum ShopSubcommand {
    List {
        #[arg(long)]
        category: Option<String>,
    },
    Show {
        product_id: u64,
    },
}

#[derive(Args, Debug)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Subcommand, Debug)]
enum CartSubcommand {
    List,
    Add {
        product_id: u64,
    },
    /// Set a line's quantity; 0 or less removes it.
    Update {
        item_id: u64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    Remove {
        item_id: u64,
    },
}

#[derive(Args, Debug)]
struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Subcommand, Debug)]
enum OrderSubcommand {
    /// Preview the order that `create` would place.
    Checkout,
    Create,
    List,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let config = ClientConfig {
        base_url: client::config::normalize_base_url(&cli.base_url),
        request_timeout_secs: cli.request_timeout_secs,
        connect_timeout_secs: cli.connect_timeout_secs,
    };
    let api = ApiClient::from_config(config)?;
    let store = FileStore::open(cli.store)?;
    tracing::debug!(store = %store.path().display(), "session store opened");
    let mut studio = Studio::new(api, SessionContext::new(store));

    match cli.command {
        Command::Whoami => {
            run_whoami(&studio);
            Ok(())
        }
        Command::Status => {
            let outcome = studio.dispatch(StudioCommand::RefreshBadge).await;
            println!("{}", studio.header().titled());
            report("status", &outcome)
        }
        command => {
            let command = into_studio_command(command);
            let name = command.name();
            let outcome = studio.dispatch(command).await;
            report(name, &outcome)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_whoami(studio: &Studio) {
    match studio.session().user() {
        Some(user) if studio.session().is_authenticated() => println!("{}", user.username),
        _ => println!("not logged in"),
    }
}

fn into_studio_command(command: Command) -> StudioCommand {
    match command {
        Command::Login { username, password } => StudioCommand::Login { username, password },
        Command::Register { username, password, email } => StudioCommand::Register { username, password, email },
        Command::Logout => StudioCommand::Logout,
        Command::View { view, category } => StudioCommand::Navigate { view, category },
        Command::Design(design) => match design.command {
            DesignSubcommand::Generate { prompt, category, style } => {
                StudioCommand::Generate { prompt, category, style }
            }
            DesignSubcommand::Gallery { category } => StudioCommand::Navigate { view: ViewId::Gallery, category },
            DesignSubcommand::Publish { design_id, name, description, price } => {
                StudioCommand::Publish { design_id: Some(design_id), name, description, price }
            }
        },
        Command::Shop(shop) => match shop.command {
            ShopSubcommand::List { category } => StudioCommand::Navigate { view: ViewId::Shop, category },
            ShopSubcommand::Show { product_id } => StudioCommand::ShowProduct { product_id },
        },
        Command::Cart(cart) => match cart.command {
            CartSubcommand::List => StudioCommand::Navigate { view: ViewId::Cart, category: None },
            CartSubcommand::Add { product_id } => StudioCommand::AddToCart { product_id },
            CartSubcommand::Update { item_id, quantity } => StudioCommand::UpdateQuantity { item_id, quantity },
            CartSubcommand::Remove { item_id } => StudioCommand::Remove { item_id },
        },
        Command::Order(order) => match order.command {
            OrderSubcommand::Checkout => StudioCommand::Checkout,
            OrderSubcommand::Create => StudioCommand::PlaceOrder,
            OrderSubcommand::List => StudioCommand::Navigate { view: ViewId::Orders, category: None },
        },
        Command::Whoami | Command::Status => StudioCommand::RefreshBadge,
    }
}

/// Screens to stdout, notifications to stderr. Any error notification fails the run.
fn report(name: &'static str, outcome: &Outcome) -> Result<(), CliError> {
    for screen in &outcome.screens {
        println!("{}", screen.titled());
    }
    let mut failed = false;
    for notification in &outcome.notifications {
        let tag = match notification.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Info => "info",
            NotificationLevel::Error => {
                failed = true;
                "error"
            }
        };
        eprintln!("[{tag}] {}", notification.message);
    }
    if outcome.prompt_login {
        eprintln!("run `studio-cli login <username> --password <password>` to sign in");
    }
    if failed { Err(CliError::CommandFailed(name)) } else { Ok(()) }
}
