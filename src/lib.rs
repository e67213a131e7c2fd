// SPDX-License-Identifier: GPL-2.0
//
// meson-postinstall - desktop integration hook for meson installs
//
// Copyright (C) 2025-2026 ghostkellz <ckelley@ghostkellz.sh>

pub mod config;
pub mod exec;
pub mod hook;
pub mod paths;

pub use crate::config::HookConfig;
pub use crate::exec::{Executor, RunStatus, SystemExecutor, ToolCommand};
pub use crate::hook::{Outcome, Plan, PostInstallHook, Step};
pub use crate::paths::InstallPaths;
