// SPDX-License-Identifier: GPL-2.0
//
// meson-postinstall - refresh desktop caches after `meson install`
//
// Copyright (C) 2025-2026 ghostkellz <ckelley@ghostkellz.sh>

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use log::{debug, info, warn};
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use meson_postinstall::{HookConfig, InstallPaths, Outcome, PostInstallHook, SystemExecutor};

/// Post-install hook for meson: icon cache, desktop database, GSettings schemas
#[derive(Parser, Debug)]
#[command(name = "meson-postinstall")]
#[command(author = "ghostkellz <ckelley@ghostkellz.sh>")]
#[command(version)]
#[command(about = "Refresh icon cache, desktop database and GSettings schemas after meson install")]
struct Args {
    /// Installation prefix [default: $MESON_INSTALL_PREFIX or /usr/local]
    #[arg(long)]
    prefix: Option<PathBuf>,

    /// Staging root; when non-empty all cache updates are skipped [default: $DESTDIR]
    #[arg(long)]
    destdir: Option<OsString>,

    /// Config file (default: /etc/meson-postinstall/config.toml, then ~/.config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the steps that would run without running them
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Fail when a cache-update command fails
    #[arg(long)]
    strict: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Debug logging (very verbose)
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        let mut cmd = Args::command();
        clap_complete::generate(shell, &mut cmd, "meson-postinstall", &mut io::stdout());
        return Ok(());
    }

    // Initialize logging
    let log_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    debug!("meson-postinstall v{}", env!("CARGO_PKG_VERSION"));

    let env_paths = InstallPaths::from_env();
    let paths = InstallPaths::new(
        args.prefix.unwrap_or(env_paths.prefix),
        args.destdir.unwrap_or(env_paths.destdir),
    );
    info!("Prefix: {:?}", paths.prefix);
    debug!(
        "bindir={:?} datadir={:?} schema_dir={:?}",
        paths.bindir, paths.datadir, paths.schema_dir
    );

    // Staged installs never read config
    let config = if paths.is_live_install() {
        let mut config = match &args.config {
            Some(path) => HookConfig::load_from_path(path)?,
            None => HookConfig::load(),
        };
        if args.strict {
            config.strict = true;
        }
        config
    } else {
        HookConfig::default()
    };

    let hook = PostInstallHook::new(paths, config);

    if args.dry_run {
        hook.print_plan();
        return Ok(());
    }

    match hook.run(&mut SystemExecutor)? {
        Outcome::Skipped => debug!("Staged install, nothing done"),
        Outcome::Completed { failed_steps: 0 } => info!("Desktop integration refreshed"),
        Outcome::Completed { failed_steps } => {
            warn!("{} cache update(s) failed, install continues", failed_steps)
        }
    }

    Ok(())
}
