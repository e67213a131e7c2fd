// SPDX-License-Identifier: GPL-2.0
//
// meson-postinstall - Post-Install Hook
//
// Refreshes the icon cache, desktop database and GSettings schemas after a
// live install. Staged installs (DESTDIR set) are left to the package manager.
//
// Copyright (C) 2025-2026 ghostkellz <ckelley@ghostkellz.sh>

use anyhow::{Result, bail};
use log::{debug, info, warn};
use std::path::PathBuf;

use crate::config::HookConfig;
use crate::exec::{Executor, ToolCommand};
use crate::paths::InstallPaths;

/// One cache-update step: status line printed first, then the command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub status: &'static str,
    pub command: ToolCommand,
}

/// Everything the hook will do on a live install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<Step>,
    pub copy_from: PathBuf,
    pub copy_to: PathBuf,
}

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Staged install, nothing touched
    Skipped,
    /// All steps attempted and the schema cache copied
    Completed { failed_steps: usize },
}

pub struct PostInstallHook {
    paths: InstallPaths,
    config: HookConfig,
}

impl PostInstallHook {
    pub fn new(paths: InstallPaths, config: HookConfig) -> Self {
        Self { paths, config }
    }

    /// Steps for a live install, or `None` when staging into DESTDIR
    pub fn plan(&self) -> Option<Plan> {
        if !self.paths.is_live_install() {
            return None;
        }

        let tools = &self.config.tools;
        let steps = vec![
            Step {
                status: "Updating icon cache...",
                command: ToolCommand::new(
                    &tools.icon_cache,
                    &["-qtf"],
                    self.paths.icon_theme_dir(&self.config.icon_theme),
                ),
            },
            Step {
                status: "Updating desktop database...",
                command: ToolCommand::new(
                    &tools.desktop_database,
                    &["-q"],
                    self.paths.applications_dir(),
                ),
            },
            Step {
                status: "Compiling GSettings schemas...",
                command: ToolCommand::new(
                    &tools.compile_schemas,
                    &[],
                    self.paths.schema_dir.clone(),
                ),
            },
        ];

        Some(Plan {
            steps,
            copy_from: self.paths.compiled_schemas(),
            copy_to: self.paths.compiled_schemas_target(),
        })
    }

    /// Run the hook.
    ///
    /// Command failures are logged and skipped unless `strict` is set. A
    /// missing compiled schema cache always fails the copy.
    pub fn run<E: Executor>(&self, executor: &mut E) -> Result<Outcome> {
        let Some(plan) = self.plan() else {
            info!(
                "DESTDIR set to {:?}, leaving cache updates to the package manager",
                self.paths.destdir
            );
            return Ok(Outcome::Skipped);
        };

        let mut failed_steps = 0;
        for step in &plan.steps {
            println!("{}", step.status);

            let status = executor.run(&step.command);
            if status.success() {
                debug!("{}: {}", step.command.program, status);
                continue;
            }

            if self.config.strict {
                bail!("{} failed: {}", step.command, status);
            }
            warn!("{} failed ({}), continuing", step.command, status);
            failed_steps += 1;
        }

        executor.copy(&plan.copy_from, &plan.copy_to)?;
        info!("Installed {:?}", plan.copy_to);

        Ok(Outcome::Completed { failed_steps })
    }

    /// Print the plan without executing anything
    pub fn print_plan(&self) {
        match self.plan() {
            None => println!(
                "DESTDIR is set ({}), nothing to do",
                self.paths.destdir.to_string_lossy()
            ),
            Some(plan) => {
                for step in &plan.steps {
                    println!("{}", step.status);
                    println!("  {}", step.command);
                }
                println!(
                    "copy {} -> {}",
                    plan.copy_from.display(),
                    plan.copy_to.display()
                );
            }
        }
    }
}
