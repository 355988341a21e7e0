use clap::{Parser, Subcommand};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("GIT_COMMIT_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "veridoc")]
#[command(version = VERSION)]
#[command(about = "Local-first vault for document-verification records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug-level logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a document upload
    #[command(alias = "up")]
    Upload {
        /// Document category: pan, aadhar, voter, or birth
        #[arg(long = "type", value_name = "TYPE")]
        doc_type: String,

        /// Identifier printed on the document
        #[arg(long)]
        document_id: String,

        /// Issue date, YYYY-MM-DD
        #[arg(long)]
        issue_date: String,

        /// Path to the document file
        file: std::path::PathBuf,
    },

    /// List documents
    #[command(alias = "ls")]
    List {
        /// Search term (matches type, document id, file name)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one document
    #[command(alias = "v")]
    View {
        /// Document record id (e.g. doc-1)
        id: String,
    },

    /// Show the verification history
    History {
        /// Filter: all, pending, verified, or rejected
        #[arg(long, default_value = "all")]
        status: String,

        /// Sort by verification date: asc or desc
        #[arg(long, default_value = "desc")]
        sort: String,
    },

    /// Apply a status reported by the verification backend
    Mark {
        /// Document record id
        id: String,

        /// New status: pending, verified, or rejected
        status: String,
    },

    /// Log in to the verification backend
    Login {
        email: String,
        password: String,
    },

    /// Create an account on the verification backend
    Register {
        email: String,
        username: String,
        password: String,

        /// Optional full name
        #[arg(long)]
        full_name: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Ask the backend to verify a document on-chain
    Verify {
        /// Backend document id (numeric)
        id: i64,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (api-url, seed-demo-data)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
