//! Campaign Dashboard: command-line front end for the campaign hierarchy store.
//!
//! Applies command scripts to a fresh dashboard, prints the overview, exports
//! reports and manages cosmetic preferences.

use anyhow::{bail, Context};
use campaign_core::config::{DisplayConfig, IdStrategy};
use campaign_core::{AppConfig, BudgetType};
use campaign_management::preferences::{DESCRIPTION_KEY, LOGO_KEY, TITLE_KEY};
use campaign_management::{
    DashboardCommand, DashboardData, DashboardSession, PreferencesStore, ThemeColors,
};
use campaign_reporting::{
    campaign_daily_budget, format_currency, format_metric_value, DashboardReport,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "campaign-dashboard")]
#[command(about = "Organize campaigns, ad sets and ads and roll up their metrics")]
#[command(version)]
struct Cli {
    /// Optional TOML config file
    #[arg(long, global = true, env = "CAMPAIGN_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply a JSON command script to a new dashboard and print the result
    Run {
        /// Path to a JSON array of commands
        script: PathBuf,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Apply a command script and export the resulting dashboard report
    Export {
        script: PathBuf,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or change cosmetic preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand, Debug)]
enum PrefsAction {
    /// Print every preference with defaults applied
    Show,
    SetTitle { title: String },
    SetDescription { description: String },
    SetLogo { logo: String },
    /// Set one theme colour (primary, secondary, background, foreground, accent)
    SetTheme { field: String, value: String },
    /// Forget all stored preferences
    Reset,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let mut config = load_config(cli.config.as_deref())?;
    // Scripts refer to nodes by id, so ids must be predictable.
    config.ids.strategy = IdStrategy::Sequential;

    match cli.command {
        Commands::Run { script, format } => {
            let session = run_script(&config, &script)?;
            let snapshot = session.store.snapshot();
            match format {
                OutputFormat::Text => {
                    let rendered =
                        render_overview(&session.preferences, &snapshot, &config.display);
                    print!("{rendered}");
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&*snapshot)?),
            }
        }
        Commands::Export {
            script,
            format,
            output,
        } => {
            let session = run_script(&config, &script)?;
            let snapshot = session.store.snapshot();
            let report = DashboardReport::build(
                &session.preferences.title(),
                &snapshot.campaigns,
                &snapshot.overview_metrics,
                snapshot.total_daily_budget,
            );
            let rendered = match format {
                ExportFormat::Csv => report.to_csv(),
                ExportFormat::Json => report.to_json()?,
            };
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), rows = report.rows.len(), "Report exported");
                }
                None => print!("{rendered}"),
            }
        }
        Commands::Prefs { action } => {
            let prefs = PreferencesStore::load(&config.preferences.path)
                .with_context(|| format!("loading preferences from {}", config.preferences.path))?;
            handle_prefs(&prefs, action)?;
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "campaign_dashboard=info,campaign_management=info,campaign_reporting=warn".into()
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// A config file named on the command line must load. Without one, a bad
/// environment falls back to defaults.
fn load_config(file: Option<&Path>) -> anyhow::Result<AppConfig> {
    match file {
        Some(path) => AppConfig::load(Some(path))
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(AppConfig::load(None).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        })),
    }
}

fn run_script(config: &AppConfig, script: &Path) -> anyhow::Result<DashboardSession> {
    let raw = std::fs::read_to_string(script)
        .with_context(|| format!("reading script {}", script.display()))?;
    let commands: Vec<DashboardCommand> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing script {}", script.display()))?;

    let mut session = DashboardSession::init(config)?;
    let total = commands.len();
    let mut skipped = 0;
    for (i, command) in commands.into_iter().enumerate() {
        if !session.store.apply(command) {
            warn!(index = i, "Command had no effect");
            skipped += 1;
        }
    }
    info!(commands = total, skipped, "Script applied");
    Ok(session)
}

fn handle_prefs(prefs: &PreferencesStore, action: PrefsAction) -> anyhow::Result<()> {
    match action {
        PrefsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&prefs.resolved())?);
        }
        PrefsAction::SetTitle { title } => prefs.set(TITLE_KEY, non_blank(&title, "title")?)?,
        PrefsAction::SetDescription { description } => prefs.set(DESCRIPTION_KEY, description)?,
        PrefsAction::SetLogo { logo } => prefs.set(LOGO_KEY, logo)?,
        PrefsAction::SetTheme { field, value } => {
            let mut theme: ThemeColors = prefs.theme();
            theme.set(&field, &value)?;
            prefs.set_theme(&theme)?;
        }
        PrefsAction::Reset => prefs.reset()?,
    }
    Ok(())
}

fn non_blank<'a>(value: &'a str, what: &str) -> anyhow::Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        bail!("{what} cannot be empty");
    }
    Ok(trimmed)
}

fn render_overview(
    prefs: &PreferencesStore,
    data: &DashboardData,
    display: &DisplayConfig,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n{}\n\n", prefs.title(), prefs.description()));
    out.push_str(&format!(
        "Daily budget: {}\n",
        format_currency(data.total_daily_budget, display)
    ));

    let selected = data.selected_metrics();
    if selected.is_empty() {
        out.push_str("No metrics selected\n");
    }
    for metric in selected {
        out.push_str(&format!(
            "  {:<24} {}\n",
            metric.name,
            format_metric_value(metric, display)
        ));
    }

    for campaign in &data.campaigns {
        let mode = match campaign.budget_type {
            BudgetType::Cbo => "CBO",
            BudgetType::Abo => "ABO",
        };
        out.push_str(&format!(
            "\n[{}] {} ({}, {}/day)\n",
            campaign.id,
            campaign.name,
            mode,
            format_currency(campaign_daily_budget(campaign), display)
        ));
        if !campaign.is_expanded {
            continue;
        }
        for ad_set in &campaign.ad_sets {
            out.push_str(&format!("  [{}] {}\n", ad_set.id, ad_set.name));
            if !ad_set.is_expanded {
                continue;
            }
            for ad in &ad_set.ads {
                let metrics: Vec<String> = ad
                    .metrics
                    .iter()
                    .map(|m| format!("{}={}", m.name, format_metric_value(m, display)))
                    .collect();
                out.push_str(&format!("    [{}] {} {}\n", ad.id, ad.name, metrics.join(" ")));
            }
        }
    }
    out
}
