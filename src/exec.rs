// SPDX-License-Identifier: GPL-2.0
//
// meson-postinstall - Command Execution
//
// Runs the external cache utilities and performs the schema copy.
//
// Copyright (C) 2025-2026 ghostkellz <ckelley@ghostkellz.sh>

use anyhow::{Context, Result};
use log::debug;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A single external program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    pub target: PathBuf,
}

impl ToolCommand {
    /// `program [args..] target`
    pub fn new(program: &str, args: &[&str], target: PathBuf) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            target,
        }
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(&self.target);
        cmd
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        write!(f, " {}", self.target.display())
    }
}

/// How a command invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    /// Exited non-zero (`None` when killed by a signal)
    Failed(Option<i32>),
    /// Could not be started at all
    SpawnFailed(String),
}

impl RunStatus {
    pub fn success(&self) -> bool {
        matches!(self, RunStatus::Success)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Success => write!(f, "success"),
            RunStatus::Failed(Some(code)) => write!(f, "exit code {}", code),
            RunStatus::Failed(None) => write!(f, "terminated by signal"),
            RunStatus::SpawnFailed(e) => write!(f, "failed to start: {}", e),
        }
    }
}

/// Side-effecting operations the hook needs from the host
pub trait Executor {
    /// Run a command to completion. Never fails; the caller decides what a
    /// non-success status means.
    fn run(&mut self, cmd: &ToolCommand) -> RunStatus;

    /// Copy `from` to `to`, returning the number of bytes written
    fn copy(&mut self, from: &Path, to: &Path) -> Result<u64>;
}

/// Executes against the real system
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run(&mut self, cmd: &ToolCommand) -> RunStatus {
        debug!("Running: {}", cmd);
        match cmd.to_command().status() {
            Ok(s) if s.success() => RunStatus::Success,
            Ok(s) => RunStatus::Failed(s.code()),
            Err(e) => RunStatus::SpawnFailed(e.to_string()),
        }
    }

    fn copy(&mut self, from: &Path, to: &Path) -> Result<u64> {
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let bytes = fs::copy(from, to)
            .with_context(|| format!("Failed to copy {:?} to {:?}", from, to))?;
        debug!("Copied {} bytes from {:?} to {:?}", bytes, from, to);
        Ok(bytes)
    }
}
