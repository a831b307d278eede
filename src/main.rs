//! Profile Forge CLI
//!
//! Provisions N browser profiles against the remote service, one request at
//! a time, pacing between attempts. Input problems abort before any remote
//! work is done; per-profile failures do not.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use profile_forge::api::{ProfileApiClient, DEFAULT_API_URL};
use profile_forge::cookies::CookieStore;
use profile_forge::proxy;
use profile_forge::rate::{Pacer, DEFAULT_PACE_MS};
use profile_forge::report::ConsoleReporter;
use profile_forge::run::{CancelFlag, Orchestrator, RunPlan};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV file with the proxy pool (host,port[,type,username,login,password])
    #[arg(long)]
    proxies: PathBuf,

    /// JSON file mapping zero-based ordinals to cookie payloads
    #[arg(long)]
    cookies: Option<PathBuf>,

    /// Number of profiles to create (omit for one per proxy pool entry)
    #[arg(long)]
    count: Option<u32>,

    /// Title prefix; profile N is titled `{prefix}_{N}`
    #[arg(long, default_value = "profile")]
    prefix: String,

    /// Delay in milliseconds after every creation attempt
    #[arg(long, default_value_t = DEFAULT_PACE_MS)]
    pace_ms: u64,

    /// Base URL of the provisioning API
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// API token for the provisioning service
    #[arg(long, env = "PROFILE_FORGE_TOKEN", hide_env_values = true)]
    token: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = profile_forge::init_logging();

    let pool = proxy::load_pool(&args.proxies).context("failed to load proxy pool")?;
    info!("Loaded {} proxies from {}", pool.len(), args.proxies.display());

    let cookies = match &args.cookies {
        Some(path) => {
            let store = CookieStore::load(path).context("failed to load cookie store")?;
            info!(
                "Loaded cookie payloads for {} profiles from {}",
                store.len(),
                path.display()
            );
            store
        }
        None => CookieStore::empty(),
    };

    // An omitted count means one profile per pool entry; an explicit 0 is
    // honored as "do nothing".
    let total = args.count.unwrap_or(pool.len() as u32);
    if args.count == Some(0) {
        warn!("Explicit count of 0: nothing to provision");
    }

    let client = ProfileApiClient::new(&args.api_url, &args.token)
        .context("failed to configure API client")?;

    let plan = RunPlan {
        total,
        title_prefix: args.prefix,
        pacer: Pacer::from_millis(args.pace_ms),
    };

    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, stopping after the current profile");
                cancel.cancel();
            }
        });
    }

    let orchestrator = Orchestrator::new(client, pool, cookies, plan);
    orchestrator.run(&ConsoleReporter, &cancel).await;

    Ok(())
}
