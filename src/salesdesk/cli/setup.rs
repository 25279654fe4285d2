use clap::{Parser, Subcommand};
use salesdesk::model::{PaymentStatus, RecordId};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "salesdesk",
    bin_name = "salesdesk",
    version,
    about = "Track clients, products and sales from the terminal",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the data files (default: $SALESDESK_DATA, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a session
    #[command(display_order = 1)]
    Login { username: String, password: String },

    /// End the current session
    #[command(display_order = 2)]
    Logout,

    /// Show who is logged in
    #[command(display_order = 3)]
    Whoami,

    /// Totals, clients with pending payments and revenue per product (default)
    #[command(alias = "dash", display_order = 10)]
    Dashboard,

    /// Manage clients
    #[command(display_order = 11)]
    Client {
        #[command(subcommand)]
        action: ClientCommands,
    },

    /// Browse the product catalog
    #[command(display_order = 12)]
    Product {
        #[command(subcommand)]
        action: ProductCommands,
    },

    /// Record and manage sales
    #[command(display_order = 13)]
    Sale {
        #[command(subcommand)]
        action: SaleCommands,
    },

    /// Print a sales report, or write it to a file
    #[command(display_order = 20)]
    Report {
        /// Write the report to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Initialize the data files (safe to run again)
    #[command(display_order = 30)]
    Init,

    /// Get or set configuration
    #[command(display_order = 31)]
    Config {
        /// Configuration key (username, password, currency)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClientCommands {
    /// List clients
    #[command(alias = "ls")]
    List,

    /// Add a client
    #[command(alias = "new")]
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        /// Paid or Pending
        #[arg(long, default_value = "pending")]
        status: PaymentStatus,
    },

    /// Change fields of a client; omitted fields keep their value
    #[command(alias = "e")]
    Edit {
        id: RecordId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Paid or Pending
        #[arg(long)]
        status: Option<PaymentStatus>,
    },

    /// Delete a client (its sales are kept)
    #[command(alias = "rm")]
    Delete {
        id: RecordId,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List products
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand, Debug)]
pub enum SaleCommands {
    /// List sales
    #[command(alias = "ls")]
    List,

    /// Record a sale; the total is price times quantity
    #[command(alias = "new")]
    Add {
        /// Client id
        #[arg(long)]
        client: RecordId,

        /// Product id
        #[arg(long)]
        product: RecordId,

        #[arg(long, allow_hyphen_values = true)]
        quantity: String,

        /// Payment method (e.g. Cash, Card, Pix)
        #[arg(long)]
        payment: String,

        /// Paid or Pending
        #[arg(long, default_value = "pending")]
        status: PaymentStatus,
    },

    /// Change fields of a sale; the total is recomputed and the date kept
    #[command(alias = "e")]
    Edit {
        id: RecordId,

        #[arg(long)]
        client: Option<RecordId>,

        #[arg(long)]
        product: Option<RecordId>,

        #[arg(long, allow_hyphen_values = true)]
        quantity: Option<String>,

        #[arg(long)]
        payment: Option<String>,

        /// Paid or Pending
        #[arg(long)]
        status: Option<PaymentStatus>,
    },

    /// Delete a sale
    #[command(alias = "rm")]
    Delete {
        id: RecordId,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Delete every sale
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
