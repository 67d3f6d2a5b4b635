//! refind-updater - regenerate UKIs and the rEFInd boot menu.
//!
//! Run after staging a new deployment (e.g. from an ostree/rpm-ostree hook):
//! reads the BLS loader entries, rebuilds one UKI per deployment and
//! graphics mode via `ukify`, restages kernels/initrds on the ESP, and
//! rewrites the rEFInd include config. No-op on hosts without rEFInd.

use anyhow::Result;
use clap::Parser;

use refind_updater::config::Config;
use refind_updater::sync;

#[derive(Parser)]
#[command(name = "refind-updater")]
#[command(about = "Regenerates UKIs and the rEFInd boot menu for Fedora Atomic deployments")]
#[command(version)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();

    // Load .env if present
    dotenvy::dotenv().ok();
    let config = Config::load();

    sync::run(&config).await
}
