// SPDX-License-Identifier: GPL-2.0
//
// meson-postinstall - Install Path Resolution
//
// Derives the bin/share/schema directories from the meson install prefix
// and the staging root.
//
// Copyright (C) 2025-2026 ghostkellz <ckelley@ghostkellz.sh>

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable meson exports with the configured prefix
pub const PREFIX_ENV: &str = "MESON_INSTALL_PREFIX";

/// Staging root set by package builds (`DESTDIR=... meson install`)
pub const DESTDIR_ENV: &str = "DESTDIR";

/// Prefix used when meson did not export one
pub const DEFAULT_PREFIX: &str = "/usr/local";

/// File produced by glib-compile-schemas
pub const COMPILED_SCHEMAS: &str = "gschemas.compiled";

/// Resolved installation layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    pub prefix: PathBuf,
    pub bindir: PathBuf,
    pub datadir: PathBuf,
    pub destdir: OsString,
    pub schema_dir: PathBuf,
}

impl InstallPaths {
    /// Build the layout for a prefix. Derived paths never depend on `destdir`.
    pub fn new(prefix: impl Into<PathBuf>, destdir: impl Into<OsString>) -> Self {
        let prefix = prefix.into();
        let bindir = prefix.join("bin");
        let datadir = prefix.join("share");
        let schema_dir = datadir.join("glib-2.0").join("schemas");

        Self {
            prefix,
            bindir,
            datadir,
            destdir: destdir.into(),
            schema_dir,
        }
    }

    /// Resolve from the process environment. Values are taken as raw OS
    /// strings; a non-UTF-8 DESTDIR is still a staging root.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Resolve through an arbitrary variable lookup.
    ///
    /// An unset prefix falls back to `/usr/local`; an unset staging root
    /// is the empty string.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let prefix = lookup(PREFIX_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFIX));
        let destdir = lookup(DESTDIR_ENV).unwrap_or_default();
        Self::new(prefix, destdir)
    }

    /// True when installing straight onto the live system
    pub fn is_live_install(&self) -> bool {
        self.destdir.is_empty()
    }

    /// Icon theme directory handed to gtk-update-icon-cache
    pub fn icon_theme_dir(&self, theme: &str) -> PathBuf {
        self.datadir.join("icons").join(theme)
    }

    /// Directory holding .desktop entries
    pub fn applications_dir(&self) -> PathBuf {
        self.datadir.join("applications")
    }

    /// Compiled schema cache inside `schema_dir`
    pub fn compiled_schemas(&self) -> PathBuf {
        self.schema_dir.join(COMPILED_SCHEMAS)
    }

    /// Where the compiled schema cache is copied to
    pub fn compiled_schemas_target(&self) -> PathBuf {
        self.bindir.join(COMPILED_SCHEMAS)
    }
}

impl Default for InstallPaths {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, OsString::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let map: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(*v)))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_derived_paths() {
        let paths = InstallPaths::new("/opt/app", "");
        assert_eq!(paths.bindir, PathBuf::from("/opt/app/bin"));
        assert_eq!(paths.datadir, PathBuf::from("/opt/app/share"));
        assert_eq!(paths.schema_dir, PathBuf::from("/opt/app/share/glib-2.0/schemas"));
        assert_eq!(
            paths.compiled_schemas_target(),
            PathBuf::from("/opt/app/bin/gschemas.compiled")
        );
    }

    #[test]
    fn test_destdir_does_not_affect_layout() {
        let live = InstallPaths::new("/usr", "");
        let staged = InstallPaths::new("/usr", "/tmp/stage");
        assert_eq!(live.bindir, staged.bindir);
        assert_eq!(live.datadir, staged.datadir);
        assert_eq!(live.schema_dir, staged.schema_dir);
        assert!(live.is_live_install());
        assert!(!staged.is_live_install());
    }

    #[test]
    fn test_unset_prefix_defaults() {
        let paths = InstallPaths::from_lookup(lookup_from(&[]));
        assert_eq!(paths.prefix, PathBuf::from("/usr/local"));
        assert!(paths.destdir.is_empty());
        assert_eq!(paths, InstallPaths::default());
    }

    #[test]
    fn test_lookup_reads_both_variables() {
        let paths = InstallPaths::from_lookup(lookup_from(&[
            ("MESON_INSTALL_PREFIX", "/opt/app"),
            ("DESTDIR", "/tmp/stage"),
        ]));
        assert_eq!(paths.prefix, PathBuf::from("/opt/app"));
        assert_eq!(paths.destdir, OsString::from("/tmp/stage"));
        assert!(!paths.is_live_install());
    }

    #[test]
    fn test_empty_destdir_is_live() {
        let paths = InstallPaths::from_lookup(lookup_from(&[("DESTDIR", "")]));
        assert!(paths.is_live_install());
    }

    #[test]
    fn test_integration_dirs() {
        let paths = InstallPaths::new("/opt/app", "");
        assert_eq!(
            paths.icon_theme_dir("hicolor"),
            PathBuf::from("/opt/app/share/icons/hicolor")
        );
        assert_eq!(
            paths.applications_dir(),
            PathBuf::from("/opt/app/share/applications")
        );
    }

    #[test]
    fn test_non_utf8_destdir_is_staged() {
        use std::os::unix::ffi::OsStringExt;

        let destdir = OsString::from_vec(b"/tmp/st\xffage".to_vec());
        let paths = InstallPaths::from_lookup(move |key| match key {
            DESTDIR_ENV => Some(destdir.clone()),
            _ => None,
        });
        assert!(!paths.is_live_install());
    }

    #[test]
    fn test_non_utf8_prefix_is_kept() {
        use std::os::unix::ffi::OsStringExt;

        let raw = b"/opt/\xffapp".to_vec();
        let prefix = OsString::from_vec(raw.clone());
        let paths = InstallPaths::from_lookup(move |key| match key {
            PREFIX_ENV => Some(prefix.clone()),
            _ => None,
        });
        assert_eq!(paths.prefix, PathBuf::from(OsString::from_vec(raw)));
        assert_ne!(paths.prefix, PathBuf::from(DEFAULT_PREFIX));
    }
}
