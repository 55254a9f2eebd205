//! Ayiti Vérité CLI
//!
//! Command-line front end for the Ayiti Vérité REST API:
//! - Sign in and out, inspect the session
//! - Submit claims, browse fact-checks and stories
//! - Show the personal dashboard
//! - Run the admin back office (submissions, fact-checks, content, users)
//! - Request AI analyses

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ayiti_verite::admin::{ContentFilter, FactCheckFilter, SubmissionFilter, UserFilter};
use ayiti_verite::config::generate_default_config;
use ayiti_verite::dashboard::stat_cards;
use ayiti_verite::models::{
    ContentCategory, FactCheckDraft, ImageUpload, PositiveContentDraft, PublishFilter,
    SubmissionStatus, SubmissionType, UserDraft, Verdict,
};
use ayiti_verite::public::{load_fact_check, Detail};
use ayiti_verite::{
    AdminContext, AiPanel, ApiClient, ClientConfig, Confirm, DashboardTab, FactCheckFeed,
    FactChecksManager, FileTokenStore, FixedConfirm, Gate, GateDecision, LoginForm,
    LoggingConfig, Notifier, PositiveContentFeed, PositiveContentManager, RegisterForm, Session,
    SubmissionForm, SubmissionsManager, SubmitOutcome, Toast, ToastKind, UserDashboard,
    UsersManager, VerdictDraft,
};

#[derive(Parser)]
#[command(name = "verite")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ayiti Vérité fact-checking platform client")]
#[command(long_about = "Ayiti Vérité fights misinformation in Haitian communities.\nSubmit claims, read fact-checks, and run the admin back office from the terminal.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides config and AYITI_API_BASE_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in
    Login {
        username: String,
        /// Password (default: AYITI_PASSWORD or prompt)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        username: String,
        email: String,
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and forget the stored tokens
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Submit a claim or URL for fact-checking
    Submit {
        /// Claim description
        #[arg(long)]
        claim: Option<String>,
        /// Where the claim was seen
        #[arg(long)]
        context: Option<String>,
        /// URL of the claim
        #[arg(long)]
        url: Option<String>,
    },

    /// List published fact-checks
    Factchecks,

    /// Show one fact-check
    Factcheck { id: i64 },

    /// List positive stories
    Stories {
        /// culture, innovation, community, nature, achievement
        #[arg(long)]
        category: Option<String>,
    },

    /// Show your dashboard
    Dashboard {
        /// overview, submissions, activity
        #[arg(long, default_value = "overview")]
        tab: String,
        /// Show the full activity list
        #[arg(long)]
        all: bool,
    },

    /// Admin back office (staff only)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// AI analysis of submissions (staff only)
    Ai {
        #[command(subcommand)]
        command: AiCommands,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Back-office counters
    Stats,
    /// Manage user submissions
    Submissions {
        #[command(subcommand)]
        command: SubmissionCommands,
    },
    /// Manage fact-checks
    Factchecks {
        #[command(subcommand)]
        command: FactCheckCommands,
    },
    /// Manage positive content
    Content {
        #[command(subcommand)]
        command: ContentCommands,
    },
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
pub enum SubmissionCommands {
    List {
        /// new, in_review, completed
        #[arg(long)]
        status: Option<String>,
        /// url or text
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Set the status of one submission
    Status { id: i64, status: String },
    Delete { id: i64 },
    /// Set the status of several submissions at once
    BulkStatus {
        status: String,
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    BulkDelete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Publish a fact-check for a submission
    Verdict {
        id: i64,
        /// Default: "Fact-Check: <claim>..."
        #[arg(long)]
        title: Option<String>,
        #[arg(long, default_value = "True")]
        verdict: String,
        #[arg(long)]
        summary: String,
        /// Do not copy claim text and URL into the fact-check
        #[arg(long)]
        no_submission_data: bool,
    },
}

#[derive(Args)]
pub struct FactCheckFields {
    #[arg(long)]
    pub title: Option<String>,
    /// True, Mostly True, Mixture, Mostly False, False, Unverifiable
    #[arg(long)]
    pub verdict: Option<String>,
    #[arg(long)]
    pub summary: Option<String>,
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum FactCheckCommands {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        verdict: Option<String>,
    },
    Create {
        #[command(flatten)]
        fields: FactCheckFields,
    },
    Update {
        id: i64,
        #[command(flatten)]
        fields: FactCheckFields,
    },
    Delete { id: i64 },
}

#[derive(Args)]
pub struct ContentFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Image file to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
    /// Linked image, used when no file is uploaded
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long)]
    pub source_url: Option<String>,
    /// Save without publishing
    #[arg(long)]
    pub draft: bool,
}

#[derive(Subcommand)]
pub enum ContentCommands {
    List {
        #[arg(long)]
        category: Option<String>,
        /// all, published, unpublished
        #[arg(long, default_value = "all")]
        state: String,
        #[arg(long, default_value = "")]
        search: String,
    },
    Create {
        #[command(flatten)]
        fields: ContentFields,
    },
    Update {
        id: i64,
        #[command(flatten)]
        fields: ContentFields,
    },
    /// Toggle the published flag
    Publish { id: i64 },
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum UserCommands {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        staff: Option<bool>,
        #[arg(long)]
        active: Option<bool>,
    },
    Create {
        username: String,
        email: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long)]
        staff: bool,
    },
    Update {
        id: i64,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Toggle the active flag
    Activate { id: i64 },
    /// Toggle staff role
    Staff { id: i64 },
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum AiCommands {
    /// Run a new analysis
    Analyze { id: i64 },
    /// Show the stored analysis
    Show { id: i64 },
}

// ============================================
// Terminal feedback
// ============================================

/// Prints toasts to the terminal
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => println!("✓ {}", toast.message),
            ToastKind::Error => eprintln!("✗ {}", toast.message),
        }
    }
}

/// Asks on stdin
struct StdinConfirm;

impl Confirm for StdinConfirm {
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

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ayiti_verite={}", logging.level)),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ClientConfig::load_with_env(path)?,
        None => ClientConfig::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_tracing(&config.logging);

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let tokens = FileTokenStore::open(&config.session.token_file)
        .with_context(|| format!("opening token file {}", config.session.token_file))?;
    tracing::debug!("Token file: {:?}", tokens.path());

    let api = ApiClient::from_config(&config, Arc::new(tokens));
    let session = Session::new(api.clone());
    session.restore().await;

    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let confirm: Arc<dyn Confirm> = if cli.yes {
        Arc::new(FixedConfirm(true))
    } else {
        Arc::new(StdinConfirm)
    };
    let json = cli.format == "json";

    match cli.command {
        Commands::Login { username, password } => {
            let form = LoginForm {
                username,
                password: read_password(password)?,
            };
            report_auth(form.submit(&session).await, "Login successful!")?;
        }

        Commands::Register {
            username,
            email,
            password,
        } => {
            let password = read_password(password)?;
            let form = RegisterForm {
                username,
                email,
                password2: password.clone(),
                password,
            };
            report_auth(form.submit(&session).await, "Registration successful!")?;
        }

        Commands::Logout => {
            session.logout().await;
            println!("Signed out");
        }

        Commands::Whoami => match session.user() {
            Some(user) if json => print_json(&user)?,
            Some(user) => {
                println!("{} ({})", user.display_name(), user.username);
                println!("  Email: {}", user.email);
                println!("  Role:  {}", if user.is_staff { "Staff" } else { "User" });
                if let Some(joined) = user.date_joined {
                    println!("  Joined: {}", joined.format("%Y-%m-%d"));
                }
            }
            None => println!("Not signed in"),
        },

        Commands::Submit {
            claim,
            context,
            url,
        } => {
            let mut form = SubmissionForm {
                claim_text: claim.unwrap_or_default(),
                context: context.unwrap_or_default(),
                url_submitted: url.unwrap_or_default(),
            };
            match form.submit(&session).await {
                SubmitOutcome::Submitted { message } => println!("{}", message),
                SubmitOutcome::AuthRequired { message, .. } => {
                    eprintln!("{}", message);
                    eprintln!("  verite login <username>");
                    std::process::exit(1);
                }
                other => bail!("{}", other.message()),
            }
        }

        Commands::Factchecks => {
            let feed = FactCheckFeed::new(api.clone());
            feed.load().await;
            if let Some(error) = feed.error() {
                bail!(error);
            }
            let items = feed.items();
            if json {
                print_json(&items)?;
            } else if items.is_empty() {
                println!("No fact-checks published yet.");
            } else {
                println!("{:<6} {:<14} {:<12} {}", "ID", "Verdict", "Date", "Title");
                println!("{}", "-".repeat(80));
                for fc in items {
                    println!(
                        "{:<6} {:<14} {:<12} {}",
                        fc.id,
                        fc.verdict_label(),
                        fc.date_created.format("%Y-%m-%d"),
                        fc.title
                    );
                }
            }
        }

        Commands::Factcheck { id } => match load_fact_check(&api, id).await {
            Detail::Found(fc) if json => print_json(&fc)?,
            Detail::Found(fc) => {
                println!("{}", fc.title);
                println!("Verdict: {}", fc.verdict_label());
                println!("Published: {}", fc.date_created.format("%Y-%m-%d"));
                if let Some(url) = &fc.url_submitted {
                    println!("Source: {}", url);
                }
                println!();
                println!("{}", fc.summary);
            }
            Detail::NotFound => bail!("Fact-check {} not found", id),
            Detail::Failed(message) => bail!(message),
        },

        Commands::Stories { category } => {
            let feed = PositiveContentFeed::new(api.clone());
            feed.set_category(parse_opt::<ContentCategory>(category.as_deref())?);
            feed.load().await;
            if let Some(error) = feed.error() {
                bail!(error);
            }
            let items = feed.visible();
            if json {
                print_json(&items)?;
            } else if items.is_empty() {
                println!("No stories in this category yet.");
            } else {
                for item in items {
                    println!("[{}] {}", item.category_label(), item.title);
                    println!("    {}", item.description);
                    if let Some(source) = &item.source_url {
                        println!("    {}", source);
                    }
                }
            }
        }

        Commands::Dashboard { tab, all } => {
            require(&session, Gate::authenticated())?;
            let dashboard = UserDashboard::new(api.clone(), notifier.clone());
            dashboard.set_tab(tab.parse::<DashboardTab>().map_err(anyhow::Error::msg)?);
            if !dashboard.load().await {
                std::process::exit(1);
            }
            print_dashboard(&dashboard, all, json).await?;
        }

        Commands::Admin { command } => {
            require(&session, Gate::staff())?;
            let ctx = AdminContext::new(api.clone(), notifier.clone(), confirm.clone());
            run_admin(command, ctx, json).await?;
        }

        Commands::Ai { command } => {
            require(&session, Gate::staff())?;
            match command {
                AiCommands::Analyze { id } => {
                    let panel = AiPanel::new(api.clone(), notifier.clone(), id);
                    match panel.analyze().await {
                        Ok(analysis) if json => print_json(&analysis)?,
                        Ok(analysis) => print_analysis(&analysis),
                        Err(_) => std::process::exit(1),
                    }
                }
                AiCommands::Show { id } => {
                    let panel = AiPanel::new(api.clone(), notifier.clone(), id);
                    match panel.load_existing().await {
                        Some(analysis) if json => print_json(&analysis)?,
                        Some(analysis) => print_analysis(&analysis),
                        None => println!("No AI analysis for submission {} yet.", id),
                    }
                }
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

// ============================================
// Admin commands
// ============================================

async fn run_admin(command: AdminCommands, ctx: AdminContext, json: bool) -> anyhow::Result<()> {
    match command {
        AdminCommands::Stats => {
            let stats = ctx.api.admin_stats().await?;
            if json {
                print_json(&stats)?;
            } else {
                for (label, value) in stats.cards() {
                    println!("{:<20} {}", label, value);
                }
                for (key, value) in &stats.extra {
                    println!("{:<20} {}", key, value);
                }
            }
        }

        AdminCommands::Submissions { command } => {
            let manager = SubmissionsManager::new(ctx);
            if !manager.refresh().await {
                std::process::exit(1);
            }
            match command {
                SubmissionCommands::List { status, kind, search } => {
                    let filter = SubmissionFilter {
                        status: parse_opt::<SubmissionStatus>(status.as_deref())?,
                        kind: match kind.as_deref() {
                            None | Some("all") => None,
                            Some("url") => Some(SubmissionType::Url),
                            Some("text") => Some(SubmissionType::Text),
                            Some(other) => bail!("unknown submission type '{}'", other),
                        },
                        search,
                    };
                    let items = manager.filtered(&filter);
                    if json {
                        print_json(&items)?;
                    } else {
                        let counts = manager.status_counts();
                        println!(
                            "{} total, {} new, {} in review, {} completed",
                            counts.total, counts.new, counts.in_review, counts.completed
                        );
                        println!();
                        println!("{:<6} {:<11} {:<11} {:<20} {}", "ID", "Status", "Type", "Submitter", "Claim");
                        println!("{}", "-".repeat(90));
                        for s in items {
                            println!(
                                "{:<6} {:<11} {:<11} {:<20} {}",
                                s.id,
                                s.status.label(),
                                s.type_label(),
                                truncate(s.submitter_label(), 20),
                                truncate(s.headline(), 60)
                            );
                        }
                    }
                }
                SubmissionCommands::Status { id, status } => {
                    let status = status.parse::<SubmissionStatus>().map_err(anyhow::Error::msg)?;
                    exit_unless(manager.update_status(id, status).await);
                }
                SubmissionCommands::Delete { id } => {
                    exit_unless(manager.delete(id).await);
                }
                SubmissionCommands::BulkStatus { status, ids } => {
                    let status = status.parse::<SubmissionStatus>().map_err(anyhow::Error::msg)?;
                    ids.iter().for_each(|&id| manager.toggle_selected(id));
                    let outcome = manager.bulk_update_status(status).await;
                    exit_unless(outcome.map_or(false, |o| o.succeeded()));
                }
                SubmissionCommands::BulkDelete { ids } => {
                    ids.iter().for_each(|&id| manager.toggle_selected(id));
                    let outcome = manager.bulk_delete().await;
                    exit_unless(outcome.map_or(false, |o| o.succeeded()));
                }
                SubmissionCommands::Verdict {
                    id,
                    title,
                    verdict,
                    summary,
                    no_submission_data,
                } => {
                    let Some(submission) = manager.get(id) else {
                        bail!("Submission {} not found", id);
                    };
                    let mut draft = VerdictDraft::from_submission(&submission);
                    if let Some(title) = title {
                        draft.title = title;
                    }
                    draft.verdict = verdict.parse::<Verdict>().map_err(anyhow::Error::msg)?;
                    draft.summary = summary;
                    draft.use_submission_data = !no_submission_data;
                    exit_unless(manager.create_verdict(&draft).await);
                }
            }
        }

        AdminCommands::Factchecks { command } => {
            let manager = FactChecksManager::new(ctx);
            if !manager.refresh().await {
                std::process::exit(1);
            }
            match command {
                FactCheckCommands::List { search, verdict } => {
                    let filter = FactCheckFilter {
                        search,
                        verdict: parse_opt::<Verdict>(verdict.as_deref())?,
                    };
                    let items = manager.filtered(&filter);
                    if json {
                        print_json(&items)?;
                    } else {
                        println!("{:<6} {:<14} {}", "ID", "Verdict", "Title");
                        println!("{}", "-".repeat(70));
                        for fc in items {
                            println!("{:<6} {:<14} {}", fc.id, fc.verdict_label(), fc.title);
                        }
                    }
                }
                FactCheckCommands::Create { fields } => {
                    let draft = apply_fact_check_fields(FactCheckDraft::default(), fields)?;
                    exit_unless(manager.create(&draft).await);
                }
                FactCheckCommands::Update { id, fields } => {
                    let Some(existing) = manager.get(id) else {
                        bail!("Fact-check {} not found", id);
                    };
                    let draft = apply_fact_check_fields(existing.to_draft(), fields)?;
                    exit_unless(manager.update(id, &draft).await);
                }
                FactCheckCommands::Delete { id } => {
                    exit_unless(manager.delete(id).await);
                }
            }
        }

        AdminCommands::Content { command } => {
            let manager = PositiveContentManager::new(ctx);
            if !manager.refresh().await {
                std::process::exit(1);
            }
            match command {
                ContentCommands::List {
                    category,
                    state,
                    search,
                } => {
                    let filter = ContentFilter {
                        category: parse_opt::<ContentCategory>(category.as_deref())?,
                        publish: match state.as_str() {
                            "all" => PublishFilter::All,
                            "published" => PublishFilter::Published,
                            "unpublished" => PublishFilter::Unpublished,
                            other => bail!("unknown publication state '{}'", other),
                        },
                        search,
                    };
                    let items = manager.filtered(&filter);
                    if json {
                        print_json(&items)?;
                    } else {
                        let counts = manager.counts();
                        println!(
                            "{} total, {} published, {} with image",
                            counts.total, counts.published, counts.with_image
                        );
                        println!();
                        for item in items {
                            println!(
                                "{:<6} {:<10} {:<26} {}",
                                item.id,
                                if item.is_published { "published" } else { "draft" },
                                item.category_label(),
                                item.title
                            );
                        }
                    }
                }
                ContentCommands::Create { fields } => {
                    let draft = apply_content_fields(PositiveContentDraft::default(), fields)?;
                    exit_unless(manager.create(&draft).await);
                }
                ContentCommands::Update { id, fields } => {
                    let Some(existing) = manager.get(id) else {
                        bail!("Content {} not found", id);
                    };
                    let draft = apply_content_fields(existing.to_draft(), fields)?;
                    exit_unless(manager.update(id, &draft).await);
                }
                ContentCommands::Publish { id } => {
                    exit_unless(manager.toggle_publish(id).await);
                }
                ContentCommands::Delete { id } => {
                    exit_unless(manager.delete(id).await);
                }
            }
        }

        AdminCommands::Users { command } => {
            let manager = UsersManager::new(ctx);
            if let UserCommands::List {
                search,
                staff,
                active,
            } = &command
            {
                manager.set_filter(UserFilter {
                    search: search.clone(),
                    is_staff: *staff,
                    is_active: *active,
                });
            }
            if !manager.refresh().await {
                std::process::exit(1);
            }
            match command {
                UserCommands::List { .. } => {
                    let users = manager.users();
                    if json {
                        print_json(&users)?;
                    } else {
                        let counts = manager.counts();
                        println!(
                            "{} total, {} staff, {} active, {} inactive",
                            counts.total, counts.staff, counts.active, counts.inactive
                        );
                        println!();
                        for u in users {
                            println!(
                                "{:<6} {:<20} {:<28} {:<6} {}{}",
                                u.id,
                                u.username,
                                u.email,
                                u.role_label(),
                                if u.is_active { "active" } else { "inactive" },
                                if u.is_current_user { " (you)" } else { "" }
                            );
                        }
                    }
                }
                UserCommands::Create {
                    username,
                    email,
                    password,
                    first_name,
                    last_name,
                    staff,
                } => {
                    let draft = UserDraft {
                        username,
                        email,
                        first_name,
                        last_name,
                        password: read_password(password)?,
                        is_staff: staff,
                        is_active: true,
                    };
                    exit_unless(manager.create(&draft).await);
                }
                UserCommands::Update {
                    id,
                    email,
                    first_name,
                    last_name,
                } => {
                    let Some(existing) = manager.get(id) else {
                        bail!("User {} not found", id);
                    };
                    let mut update = existing.to_update();
                    if let Some(email) = email {
                        update.email = email;
                    }
                    if let Some(first) = first_name {
                        update.first_name = first;
                    }
                    if let Some(last) = last_name {
                        update.last_name = last;
                    }
                    exit_unless(manager.update(id, &update).await);
                }
                UserCommands::Activate { id } => exit_unless(manager.toggle_active(id).await),
                UserCommands::Staff { id } => exit_unless(manager.toggle_staff(id).await),
                UserCommands::Delete { id } => exit_unless(manager.delete(id).await),
            }
        }
    }

    Ok(())
}

fn apply_fact_check_fields(mut draft: FactCheckDraft, fields: FactCheckFields) -> anyhow::Result<FactCheckDraft> {
    if let Some(title) = fields.title {
        draft.title = title;
    }
    if let Some(verdict) = fields.verdict {
        draft.verdict = verdict.parse::<Verdict>().map_err(anyhow::Error::msg)?;
    }
    if let Some(summary) = fields.summary {
        draft.summary = summary;
    }
    if let Some(url) = fields.url {
        draft.url_submitted = url;
    }
    Ok(draft)
}

fn apply_content_fields(
    mut draft: PositiveContentDraft,
    fields: ContentFields,
) -> anyhow::Result<PositiveContentDraft> {
    if let Some(title) = fields.title {
        draft.title = title;
    }
    if let Some(category) = fields.category {
        draft.content_type = category.parse::<ContentCategory>().map_err(anyhow::Error::msg)?;
    }
    if let Some(description) = fields.description {
        draft.description = description;
    }
    if let Some(path) = fields.image {
        draft.image = Some(read_image(&path)?);
    }
    if let Some(url) = fields.image_url {
        draft.image_url = url;
    }
    if let Some(source) = fields.source_url {
        draft.source_url = source;
    }
    if fields.draft {
        draft.is_published = false;
    }
    Ok(draft)
}

fn read_image(path: &Path) -> anyhow::Result<ImageUpload> {
    let bytes = std::fs::read(path).with_context(|| format!("reading image {:?}", path))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());

    Ok(ImageUpload {
        file_name,
        mime: mime.to_string(),
        bytes,
    })
}

// ============================================
// Helpers
// ============================================

fn require(session: &Session, gate: Gate) -> anyhow::Result<()> {
    match gate.decide(session) {
        GateDecision::Render => Ok(()),
        GateDecision::Redirect { reason, .. } => bail!("{}", reason),
        GateDecision::Loading => bail!("Session is still loading"),
    }
}

fn report_auth(outcome: ayiti_verite::AuthOutcome, success: &str) -> anyhow::Result<()> {
    match outcome {
        ayiti_verite::AuthOutcome::Success(user) => {
            println!("{} Signed in as {}", success, user.username);
            Ok(())
        }
        ayiti_verite::AuthOutcome::Failure { error } => bail!(error),
    }
}

fn read_password(given: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = given.or_else(|| std::env::var("AYITI_PASSWORD").ok()) {
        return Ok(password);
    }
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// `None` for a missing value or "all"
fn parse_opt<T>(value: Option<&str>) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr<Err = String>,
{
    match value {
        None | Some("all") => Ok(None),
        Some(v) => v.parse::<T>().map(Some).map_err(anyhow::Error::msg),
    }
}

fn exit_unless(ok: bool) {
    if !ok {
        std::process::exit(1);
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

fn print_analysis(analysis: &ayiti_verite::models::AiAnalysis) {
    println!("Suggested verdict: {}", analysis.verdict_label());
    println!("Confidence:        {}", analysis.confidence_percent());
    if !analysis.evidence_sources.is_empty() {
        println!();
        println!("Evidence:");
        for source in &analysis.evidence_sources {
            println!("  - {}", source);
        }
    }
    if !analysis.similar_claims.is_empty() {
        println!();
        println!("Similar claims:");
        for claim in &analysis.similar_claims {
            println!("  - {}", claim);
        }
    }
    println!();
    println!("{}", analysis.footer());
}

async fn print_dashboard(dashboard: &UserDashboard, show_all: bool, json: bool) -> anyhow::Result<()> {
    let Some(data) = dashboard.data() else {
        return Ok(());
    };

    match dashboard.tab() {
        DashboardTab::Overview => {
            if json {
                return print_json(&data);
            }
            println!("Welcome back, {}!", data.user.username);
            println!();
            for (label, value) in stat_cards(&data.stats) {
                println!("{:<20} {}", label, value);
            }
            println!("{:<20} {:.0}%", "Completion Rate", data.stats.completion_rate());
            println!();
            print_activity(dashboard, false);
        }
        DashboardTab::Submissions => {
            if !dashboard.load_submissions().await {
                std::process::exit(1);
            }
            let submissions = dashboard.submissions();
            if json {
                return print_json(&submissions);
            }
            if submissions.is_empty() {
                println!("You haven't submitted any claims yet.");
            }
            for s in submissions {
                println!("{} {} [{}]", s.status_icon(), truncate(s.headline(), 70), s.status_label());
                if let Some(title) = &s.related_factcheck_title {
                    println!("    Fact-check: {}", title);
                }
                if let Some(guidance) = s.guidance() {
                    println!("    {}", guidance);
                }
            }
        }
        DashboardTab::Activity => {
            if json {
                let entries: Vec<_> = dashboard
                    .recent_activity(show_all)
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "description": e.description(),
                            "headline": e.headline(),
                            "date": e.date(),
                        })
                    })
                    .collect();
                return print_json(&entries);
            }
            print_activity(dashboard, show_all);
        }
    }
    Ok(())
}

fn print_activity(dashboard: &UserDashboard, show_all: bool) {
    let entries = dashboard.recent_activity(show_all);
    println!("Recent Activity");
    if entries.is_empty() {
        println!("  No recent activity");
    }
    for entry in entries {
        println!(
            "  {} {} - {} ({})",
            entry.icon(),
            entry.description(),
            truncate(entry.headline(), 50),
            entry.date().format("%Y-%m-%d %H:%M")
        );
    }
}
