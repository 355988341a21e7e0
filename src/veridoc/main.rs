use chrono::{DateTime, Utc};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;
use veridoc::api::{CmdMessage, MessageLevel, UploadRequest, VeridocApi};
use veridoc::client::{ApiClient, RegisterRequest};
use veridoc::config::VeridocConfig;
use veridoc::error::{Result, VeridocError};
use veridoc::model::{DocumentRecord, HistoryEntry, SortDirection, StatusFilter};
use veridoc::store::fs::FileStore;
use veridoc::store::records::RecordStore;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: VeridocApi<FileStore>,
    config: VeridocConfig,
    data_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Upload {
            doc_type,
            document_id,
            issue_date,
            file,
        }) => handle_upload(&mut ctx, doc_type, document_id, issue_date, file),
        Some(Commands::List { search }) => handle_list(&mut ctx, search),
        Some(Commands::View { id }) => handle_view(&mut ctx, &id),
        Some(Commands::History { status, sort }) => handle_history(&mut ctx, &status, &sort),
        Some(Commands::Mark { id, status }) => handle_mark(&mut ctx, &id, &status),
        Some(Commands::Login { email, password }) => handle_login(&mut ctx, &email, &password),
        Some(Commands::Register {
            email,
            username,
            password,
            full_name,
        }) => handle_register(&mut ctx, email, username, password, full_name),
        Some(Commands::Logout) => handle_logout(&mut ctx),
        Some(Commands::Whoami) => handle_whoami(&ctx),
        Some(Commands::Verify { id }) => handle_verify(&ctx, id),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, None),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "veridoc=debug" } else { "veridoc=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn init_context() -> Result<AppContext> {
    let data_dir = match std::env::var_os("VERIDOC_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("com", "veridoc", "veridoc")
            .ok_or_else(|| VeridocError::Store("Could not determine data dir".to_string()))?
            .data_dir()
            .to_path_buf(),
    };

    let config = VeridocConfig::load(&data_dir)?;
    let store =
        RecordStore::new(FileStore::new(data_dir.clone())).with_seeding(config.seed_demo_data);
    let api = VeridocApi::new(store);

    Ok(AppContext {
        api,
        config,
        data_dir,
    })
}

fn remote_client(ctx: &AppContext) -> Result<ApiClient> {
    let client = ApiClient::new(&ctx.config.api_url)?;
    match ctx.api.session()? {
        Some(session) => Ok(client.with_token(session.token)),
        None => Ok(client),
    }
}

fn handle_upload(
    ctx: &mut AppContext,
    doc_type: String,
    document_id: String,
    issue_date: String,
    file: PathBuf,
) -> Result<()> {
    let doc_type = doc_type.parse().map_err(VeridocError::Api)?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_size = std::fs::metadata(&file).map(|m| m.len()).unwrap_or(0);
    let file_type = mime_for(&file);

    let result = ctx.api.upload_document(UploadRequest {
        doc_type,
        document_id,
        issue_date,
        file_name,
        file_size,
        file_type,
    })?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, search: Option<String>) -> Result<()> {
    let result = ctx.api.list_documents(search.as_deref())?;
    print_documents(&result.documents);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.view_document(id)?;
    for doc in &result.documents {
        print_document_detail(doc);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_history(ctx: &mut AppContext, status: &str, sort: &str) -> Result<()> {
    let filter: StatusFilter = status.parse().map_err(VeridocError::Api)?;
    let direction: SortDirection = sort.parse().map_err(VeridocError::Api)?;

    let result = ctx.api.history(filter, direction)?;
    print_history(&result.history);
    print_messages(&result.messages);
    Ok(())
}

fn handle_mark(ctx: &mut AppContext, id: &str, status: &str) -> Result<()> {
    let status = status.parse().map_err(VeridocError::Api)?;
    let result = ctx.api.mark_document(id, status)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_login(ctx: &mut AppContext, email: &str, password: &str) -> Result<()> {
    let mut client = ApiClient::new(&ctx.config.api_url)?;
    let auth = client.login(email, password)?;
    let session = auth.into_session();
    ctx.api.save_session(&session)?;
    println!("{}", format!("Logged in as {}", session.user.username).green());
    Ok(())
}

fn handle_register(
    ctx: &mut AppContext,
    email: String,
    username: String,
    password: String,
    full_name: Option<String>,
) -> Result<()> {
    let mut client = ApiClient::new(&ctx.config.api_url)?;
    let auth = client.register(&RegisterRequest {
        email,
        username,
        password,
        full_name,
    })?;
    let session = auth.into_session();
    ctx.api.save_session(&session)?;
    println!(
        "{}",
        format!("Account created, logged in as {}", session.user.username).green()
    );
    Ok(())
}

fn handle_logout(ctx: &mut AppContext) -> Result<()> {
    ctx.api.clear_session()?;
    println!("Logged out.");
    Ok(())
}

fn handle_whoami(ctx: &AppContext) -> Result<()> {
    match ctx.api.session()? {
        Some(session) => println!("{} <{}>", session.user.username, session.user.email),
        None => println!("Not logged in."),
    }
    Ok(())
}

fn handle_verify(ctx: &AppContext, id: i64) -> Result<()> {
    let client = remote_client(ctx)?;
    let result = client.verify_on_blockchain(id)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key.as_deref(), value) {
        (None, _) => {
            println!("api-url = {}", ctx.config.api_url);
            println!("seed-demo-data = {}", ctx.config.seed_demo_data);
        }
        (Some("api-url"), None) => println!("api-url = {}", ctx.config.api_url),
        (Some("api-url"), Some(v)) => {
            ctx.config.api_url = v;
            ctx.config.save(&ctx.data_dir)?;
        }
        (Some("seed-demo-data"), None) => {
            println!("seed-demo-data = {}", ctx.config.seed_demo_data)
        }
        (Some("seed-demo-data"), Some(v)) => {
            ctx.config.seed_demo_data = v
                .parse()
                .map_err(|_| VeridocError::Api(format!("Expected true or false, got: {}", v)))?;
            ctx.config.save(&ctx.data_dir)?;
        }
        (Some(other), _) => println!("Unknown config key: {}", other),
    }
    Ok(())
}

fn mime_for(path: &std::path::Path) -> String {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
    .to_string()
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;

fn print_documents(docs: &[DocumentRecord]) {
    if docs.is_empty() {
        println!("No documents found.");
        return;
    }

    for doc in docs {
        let time_ago = format_time_ago(doc.upload_date);

        let label = format!(
            "{}  {} ({})",
            doc.id,
            doc.doc_type.display_name(),
            doc.document_id
        );
        // Pad on the plain text; color only when printing.
        let fixed = status_label(doc.status).width() + TIME_WIDTH + 4;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let label = truncate_to_width(&label, available);
        let padding = available.saturating_sub(label.width());

        println!(
            "  {}{}  {}  {}",
            label,
            " ".repeat(padding),
            status_badge(doc.status),
            time_ago.dimmed()
        );
    }
}

fn print_document_detail(doc: &DocumentRecord) {
    println!("{}", doc.id.bold());
    println!("--------------------------------");
    println!("Type:        {}", doc.doc_type.display_name());
    println!("Document ID: {}", doc.document_id);
    println!("Issue date:  {}", doc.issue_date);
    println!("File:        {} ({} bytes, {})", doc.file_name, doc.file_size, doc.file_type);
    println!("Uploaded:    {}", doc.upload_date.format("%Y-%m-%d %H:%M"));
    println!("Status:      {}", status_badge(doc.status));
}

fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No verification records found.");
        return;
    }

    for entry in entries {
        let label = format!(
            "{}  {} {}",
            entry.verification_date.format("%Y-%m-%d %H:%M"),
            entry.document_type.display_name(),
            entry.document_name
        );
        let available = LINE_WIDTH.saturating_sub(status_label(entry.status).width() + 4);
        let label = truncate_to_width(&label, available);
        let padding = available.saturating_sub(label.width());

        println!(
            "  {}{}  {}",
            label,
            " ".repeat(padding),
            status_badge(entry.status)
        );
    }
    println!();
    println!("{}", format!("{} entries", entries.len()).dimmed());
}

fn status_label(status: veridoc::model::VerificationStatus) -> &'static str {
    use veridoc::model::VerificationStatus::*;
    match status {
        Verified => "verified",
        Rejected => "rejected",
        Pending => "pending",
    }
}

fn status_badge(status: veridoc::model::VerificationStatus) -> ColoredString {
    use veridoc::model::VerificationStatus::*;
    match status {
        Verified => status_label(status).green(),
        Rejected => status_label(status).red(),
        Pending => status_label(status).yellow(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
