use crate::backend::CustomerApi;
use crate::config::{
    DeskConfig, DEFAULT_ATTACH_DOCTYPE, DEFAULT_CUSTOMERS_MODULE, DEFAULT_FEED_MODULE,
};
use crate::customers::{table_rows, CustomerManager};
use crate::feed::SocialFeed;
use crate::model::Address;
use crate::outcome::Outcome;
use crate::rpc::FrappeClient;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use secrecy::SecretString;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "frappe-desk",
    version,
    about = "Customer records and blog feed for a Frappe site, as a TUI or one-shot commands"
)]
pub struct Cli {
    /// Base URL of the Frappe site
    #[arg(long, env = "FRAPPE_URL", default_value = "http://localhost:8000", global = true)]
    pub base_url: String,

    /// API key for token authentication (requires --api-secret)
    #[arg(long, env = "FRAPPE_API_KEY", global = true)]
    pub api_key: Option<String>,

    /// API secret for token authentication
    #[arg(long, env = "FRAPPE_API_SECRET", hide_env_values = true, global = true)]
    pub api_secret: Option<String>,

    /// Session id cookie of a logged-in browser session
    #[arg(long, env = "FRAPPE_SID", hide_env_values = true, global = true)]
    pub sid: Option<String>,

    /// CSRF token sent with state-changing calls
    #[arg(long, env = "FRAPPE_CSRF_TOKEN", hide_env_values = true, global = true)]
    pub csrf_token: Option<String>,

    /// Per-request timeout
    #[arg(long, default_value = "30s", global = true)]
    pub timeout: humantime::Duration,

    /// Python module holding the customer methods
    #[arg(long, default_value = DEFAULT_CUSTOMERS_MODULE, global = true)]
    pub customers_module: String,

    /// Python module holding the blog feed method
    #[arg(long, default_value = DEFAULT_FEED_MODULE, global = true)]
    pub feed_module: String,

    /// Doctype uploaded photos are attached to
    #[arg(long, default_value = DEFAULT_ATTACH_DOCTYPE, global = true)]
    pub attach_doctype: String,

    /// Print JSON instead of text (one-shot commands)
    #[arg(long, global = true)]
    pub json: bool,

    /// Write logs to this file (the TUI always logs to a file)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Manage customer records
    Customers {
        #[command(subcommand)]
        action: CustomersAction,
    },
    /// List published blog posts
    Blogs {
        /// Title search term
        #[arg(long, short, default_value = "")]
        search: String,
    },
    /// Interactive terminal UI (default)
    Tui,
}

#[derive(Debug, Subcommand, Clone)]
pub enum CustomersAction {
    /// List all customers
    List,
    /// Show one customer with its addresses
    Show { docname: String },
    /// Create a customer, or update one when --docname is given
    ///
    /// An update loads the stored record first; only the values passed here
    /// replace what is stored.
    Save {
        #[arg(long)]
        docname: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Image to upload and attach as the photo
        #[arg(long)]
        photo: Option<PathBuf>,
        /// Address as "line1|city|pincode"; repeat for several rows. Replaces the stored rows
        #[arg(long = "address", value_parser = parse_address)]
        addresses: Vec<Address>,
        /// Remove every stored address row
        #[arg(long, conflicts_with = "addresses")]
        clear_addresses: bool,
    },
    /// Delete a customer
    Delete {
        docname: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

impl Cli {
    /// Whether this invocation runs the full-screen UI.
    pub fn is_interactive(&self) -> bool {
        cfg!(feature = "tui") && matches!(self.command, None | Some(Command::Tui))
    }
}

/// Parse `line1|city|pincode`.
fn parse_address(raw: &str) -> Result<Address, String> {
    let parts: Vec<&str> = raw.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [line1, city, pincode] => {
            let a = Address::new(*line1, *city, *pincode);
            if a.is_complete() {
                Ok(a)
            } else {
                Err("all three address parts are required".into())
            }
        }
        _ => Err(format!("expected \"line1|city|pincode\", got {raw:?}")),
    }
}

/// Build a `DeskConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> Result<DeskConfig> {
    let auth = DeskConfig::resolve_auth(
        args.api_key.clone(),
        args.api_secret.clone(),
        args.sid.clone(),
    )?;
    Ok(DeskConfig {
        base_url: DeskConfig::parse_base_url(&args.base_url)?,
        auth,
        csrf_token: args
            .csrf_token
            .clone()
            .filter(|t| !t.is_empty())
            .map(SecretString::from),
        timeout: Duration::from(args.timeout),
        user_agent: format!("frappe-desk/{}", env!("CARGO_PKG_VERSION")),
        customers_module: args.customers_module.clone(),
        feed_module: args.feed_module.clone(),
        attach_doctype: args.attach_doctype.clone(),
        log_file: args.log_file.clone(),
    })
}

pub async fn run(args: Cli) -> Result<()> {
    let cfg = build_config(&args)?;
    tracing::debug!(config = ?cfg, "starting");

    match args.command.clone() {
        None | Some(Command::Tui) => run_tui(cfg).await,
        Some(Command::Customers { action }) => run_customers(&args, &cfg, action).await,
        Some(Command::Blogs { search }) => run_blogs(&args, &cfg, &search).await,
    }
}

#[cfg(feature = "tui")]
async fn run_tui(cfg: DeskConfig) -> Result<()> {
    crate::tui::run(cfg).await
}

#[cfg(not(feature = "tui"))]
async fn run_tui(_cfg: DeskConfig) -> Result<()> {
    Err(anyhow::anyhow!(
        "built without TUI support; use the `customers` or `blogs` subcommands"
    ))
}

fn print_json<T: serde::Serialize>(tx: &mpsc::UnboundedSender<OutputLine>, v: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(v)?;
    let _ = tx.send(OutputLine::Stdout(out));
    Ok(())
}

async fn run_customers(args: &Cli, cfg: &DeskConfig, action: CustomersAction) -> Result<()> {
    let client = FrappeClient::new(cfg).context("building HTTP client")?;
    let mut manager = CustomerManager::new(cfg.attach_doctype.clone());
    let (out_tx, out_handle) = spawn_output_writer();

    let res = customers_action(args, &client, &mut manager, action, &out_tx).await;

    drop(out_tx);
    let _ = out_handle.await;
    res
}

async fn customers_action<A: CustomerApi>(
    args: &Cli,
    api: &A,
    manager: &mut CustomerManager,
    action: CustomersAction,
    out_tx: &mpsc::UnboundedSender<OutputLine>,
) -> Result<()> {
    match action {
        CustomersAction::List => {
            manager.load_list(api).await.into_result("Loading customers")?;
            if args.json {
                print_json(out_tx, &manager.table)?;
            } else {
                for line in crate::text_output::customer_table(&table_rows(&manager.table)) {
                    let _ = out_tx.send(OutputLine::Stdout(line));
                }
            }
        }
        CustomersAction::Show { docname } => {
            let customer = manager
                .edit(api, &docname)
                .await
                .into_result("Loading customer")?;
            if args.json {
                print_json(out_tx, &customer)?;
            } else {
                for line in crate::text_output::customer_detail(&customer) {
                    let _ = out_tx.send(OutputLine::Stdout(line));
                }
            }
        }
        CustomersAction::Save {
            docname,
            first_name,
            last_name,
            email,
            photo,
            addresses,
            clear_addresses,
        } => {
            if let Some(docname) = docname.as_deref().filter(|d| !d.trim().is_empty()) {
                manager
                    .edit(api, docname)
                    .await
                    .into_result("Loading customer")?;
            }
            let form = &mut manager.form;
            if let Some(v) = first_name {
                form.first_name = v;
            }
            if let Some(v) = last_name {
                form.last_name = v;
            }
            if let Some(v) = email {
                form.email = v;
            }
            if clear_addresses || !addresses.is_empty() {
                form.addresses.clear();
                for a in addresses {
                    manager.add_address_row(Some(a));
                }
            }

            // A failed upload keeps the previous photo and the save goes ahead.
            if let Some(path) = photo {
                let msg = match manager.upload_photo(api, path).await {
                    Outcome::Success(file) => format!("Uploaded: {}", file.file_url),
                    _ => "Photo upload failed; keeping the previous photo".to_string(),
                };
                let _ = out_tx.send(OutputLine::Stderr(msg));
            }

            let reply = manager.save(api).await?.into_result("Save")?;
            if args.json {
                print_json(out_tx, &reply)?;
            } else {
                let name = reply.docname.as_deref().unwrap_or("-");
                let _ = out_tx.send(OutputLine::Stdout(format!("Customer saved: {name}")));
            }
        }
        CustomersAction::Delete { docname, yes } => {
            let outcome = manager
                .delete(api, &docname, |prompt| yes || confirm_on_stdin(prompt))
                .await;
            match outcome {
                None => {
                    let _ = out_tx.send(OutputLine::Stderr("Cancelled".into()));
                }
                Some(outcome) => {
                    let reply = outcome.into_result("Delete")?;
                    if args.json {
                        print_json(out_tx, &reply)?;
                    } else {
                        let _ = out_tx
                            .send(OutputLine::Stdout(format!("Customer deleted: {docname}")));
                    }
                }
            }
        }
    }
    Ok(())
}

/// Ask a yes/no question on the terminal. Anything but y/yes declines.
fn confirm_on_stdin(prompt: &str) -> bool {
    let mut err = std::io::stderr();
    let _ = write!(err, "{prompt} [y/N] ");
    let _ = err.flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

async fn run_blogs(args: &Cli, cfg: &DeskConfig, search: &str) -> Result<()> {
    let client = FrappeClient::new(cfg).context("building HTTP client")?;
    let (out_tx, out_handle) = spawn_output_writer();

    let mut feed = SocialFeed::new();
    feed.search(&client, search).await;
    let res = match feed.notice.take() {
        Some(notice) => Err(anyhow::anyhow!("{}", notice.text())),
        None if args.json => print_json(&out_tx, &feed.cards),
        None => {
            for line in crate::text_output::blog_cards(&feed.cards) {
                let _ = out_tx.send(OutputLine::Stdout(line));
            }
            Ok(())
        }
    };

    drop(out_tx);
    let _ = out_handle.await;
    res
}
