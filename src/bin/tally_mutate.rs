use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tally_client::domain::entities::{Notification, NotificationLevel};
use tally_client::infrastructure::notifications::ToastQueue;
use tally_client::shared::logging;
use tally_client::{AppConfig, AppState, EntityId, SameEntityPolicy};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "tally-mutate")]
#[command(about = "Send an optimistic mutation to the Tally backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL
    #[arg(long, env = "TALLY_API_BASE_URL")]
    base_url: Option<String>,

    /// Bearer token
    #[arg(long, env = "TALLY_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Role sent as X-User-Role
    #[arg(long, env = "TALLY_API_ROLE")]
    role: Option<String>,

    /// Allow overlapping mutations on the same entity
    #[arg(long)]
    unguarded: bool,

    /// Log filter directive
    #[arg(short, long, default_value = logging::DEFAULT_DIRECTIVE, env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "JSON_LOGS")]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn a feature on or off for one user
    ToggleFeature {
        #[arg(long)]
        user: String,
        #[arg(long)]
        feature: String,
        /// Value currently shown for the flag
        #[arg(long)]
        current: bool,
        /// Value to switch to
        #[arg(long)]
        enable: bool,
    },
    /// Add a signed amount (minor units) to an account balance
    AdjustBalance {
        #[arg(long)]
        account: String,
        /// Balance currently shown for the account
        #[arg(long, allow_hyphen_values = true)]
        current: i64,
        #[arg(long, allow_hyphen_values = true)]
        delta: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.json_logs);

    let mut config = AppConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.trim().trim_end_matches('/').to_string();
    }
    if cli.token.is_some() {
        config.api.bearer_token = cli.token.clone();
    }
    if cli.role.is_some() {
        config.api.role = cli.role.clone();
    }
    if cli.unguarded {
        config.mutation.same_entity_policy = SameEntityPolicy::Unguarded;
    }
    debug!(base_url = %config.api.base_url, "configuration loaded");

    let state = AppState::new(config).context("failed to build client state")?;

    let confirmed = match cli.command {
        Commands::ToggleFeature {
            user,
            feature,
            current,
            enable,
        } => toggle_feature(&state, &user, &feature, current, enable).await?,
        Commands::AdjustBalance {
            account,
            current,
            delta,
        } => adjust_balance(&state, &account, current, delta).await?,
    };

    print_toasts(&state.toasts);
    if !confirmed {
        bail!("mutation was rolled back");
    }
    Ok(())
}

async fn toggle_feature(
    state: &AppState,
    user: &str,
    feature: &str,
    current: bool,
    enable: bool,
) -> Result<bool> {
    state.features.load_user_flags([(user, feature, current)])?;
    let handle = state.features.toggle_for_user(user, feature, enable)?;
    info!(
        mutation_id = %handle.id(),
        entity_id = %handle.entity_id(),
        policy = %state.features.user_flags().policy(),
        "feature toggle sent"
    );

    let settled = handle.settled().await?;
    let shown = state.features.is_enabled(user, feature).unwrap_or(current);
    println!("{user}:{feature} = {}", if shown { "on" } else { "off" });
    Ok(settled.outcome.is_confirmed())
}

async fn adjust_balance(state: &AppState, account: &str, current: i64, delta: i64) -> Result<bool> {
    let account_id = EntityId::new(account.to_string()).map_err(anyhow::Error::msg)?;
    state.accounts.load([(account_id.clone(), current)]);
    let handle = state.accounts.adjust_balance(account_id.clone(), delta)?;
    info!(
        mutation_id = %handle.id(),
        entity_id = %handle.entity_id(),
        policy = %state.accounts.balances().policy(),
        "balance adjustment sent"
    );

    let settled = handle.settled().await?;
    let shown = state.accounts.balance(&account_id).unwrap_or(current);
    println!("{account_id} = {shown}");
    Ok(settled.outcome.is_confirmed())
}

fn print_toasts(toasts: &Arc<ToastQueue>) {
    for Notification { level, message, .. } in toasts.active() {
        match level {
            NotificationLevel::Success => println!("[ok] {message}"),
            NotificationLevel::Error => eprintln!("[error] {message}"),
        }
    }
}
