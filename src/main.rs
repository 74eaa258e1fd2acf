use std::fs;
use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use carebill::composer::{self, InvoiceDraft};
use carebill::models::{InvoiceStatus, NewClient, NewInvoiceItem};
use carebill::stats::{self, StatusFilter};
use carebill::store::BillingStore;
use carebill::{config, db, money, render};

#[derive(Parser)]
#[command(
    name = "carebill",
    about = "Clients, invoices and printable billing documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage clients
    Clients {
        #[command(subcommand)]
        command: ClientCommands,
    },
    /// Manage invoices
    Invoices {
        #[command(subcommand)]
        command: InvoiceCommands,
    },
}

#[derive(Subcommand)]
enum ClientCommands {
    /// List all clients
    List,
    /// Add a new client
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        address: String,
    },
}

#[derive(Subcommand)]
enum InvoiceCommands {
    /// List invoices with a dashboard summary
    List {
        /// Match against the invoice or client id
        #[arg(long, default_value = "")]
        search: String,
        /// all, paid or unpaid
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Show one invoice with its items
    Show { id: i32 },
    /// Create an invoice from header fields and item specs
    Create {
        #[arg(long)]
        client_id: i32,
        /// Invoice date, yyyy-mm-dd
        #[arg(long)]
        date: String,
        /// Additive tax amount
        #[arg(long, default_value = "0")]
        tax: Decimal,
        #[arg(long, default_value = "unpaid")]
        status: InvoiceStatus,
        /// One or more "description:quantity:price" specs, in order
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },
    /// Write the printable text and PDF documents for an invoice
    Export { id: i32 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration and connect
    let config = config::init()?;
    let db = db::init(&config).await?;

    match cli.command {
        Commands::Clients { command } => match command {
            ClientCommands::List => {
                for client in db.list_clients().await? {
                    println!(
                        "#{} {} <{}> {}",
                        client.id, client.name, client.email, client.address
                    );
                }
            }
            ClientCommands::Add {
                name,
                email,
                address,
            } => {
                let client = NewClient {
                    name,
                    email,
                    address,
                };
                let id = composer::register_client(&db, &client).await?;
                println!("created client #{id}");
            }
        },
        Commands::Invoices { command } => match command {
            InvoiceCommands::List { search, status } => {
                let invoices = db.list_invoices().await?;

                // The summary covers every invoice; the filter only narrows
                // the listing below it.
                let summary = stats::summarize(&invoices);
                println!(
                    "{} invoices, total ${}, paid ${}, unpaid ${}",
                    summary.count,
                    money::format(summary.total_amount),
                    money::format(summary.paid_amount),
                    money::format(summary.unpaid_amount)
                );

                for invoice in stats::filter_invoices(&invoices, &search, status) {
                    println!(
                        "#{} client {} {} ${} {}",
                        invoice.id,
                        invoice.client_id,
                        invoice.date,
                        money::format(invoice.total),
                        invoice.status
                    );
                }
            }
            InvoiceCommands::Show { id } => {
                let invoice = db.get_invoice(id).await?;
                let items = db.list_invoice_items(id).await?;
                print!("{}", render::invoice_text(&invoice, &items));
            }
            InvoiceCommands::Create {
                client_id,
                date,
                tax,
                status,
                items,
            } => {
                let items = items
                    .iter()
                    .map(|spec| parse_item_spec(spec))
                    .collect::<Result<Vec<_>>>()?;
                let draft = InvoiceDraft {
                    client_id,
                    date,
                    tax,
                    status,
                };
                let id = composer::compose_invoice(&db, &draft, &items).await?;
                println!("created invoice #{id}");
            }
            InvoiceCommands::Export { id } => {
                let invoice = db.get_invoice(id).await?;
                let items = db.list_invoice_items(id).await?;

                let dir = Path::new(&config.export_dir);
                fs::create_dir_all(dir)?;

                let text_path = dir.join(format!("invoice_{id}.txt"));
                let pdf_path = dir.join(format!("invoice_{id}.pdf"));
                fs::write(&text_path, render::invoice_text(&invoice, &items))?;
                fs::write(&pdf_path, render::invoice_pdf(&invoice, &items)?)?;

                println!("wrote {} and {}", text_path.display(), pdf_path.display());
            }
        },
    }

    Ok(())
}

/// Parse one "description:quantity:price" item spec.
fn parse_item_spec(spec: &str) -> Result<NewInvoiceItem> {
    let mut parts = spec.rsplitn(3, ':');
    let price = parts.next();
    let quantity = parts.next();
    let description = parts.next();

    let (Some(description), Some(quantity), Some(price)) = (description, quantity, price) else {
        anyhow::bail!("item spec {spec:?} is not description:quantity:price");
    };

    Ok(NewInvoiceItem {
        description: description.to_string(),
        quantity: quantity.parse()?,
        price: price.parse()?,
    })
}
