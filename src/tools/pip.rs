//! Package installation through the environment's own pip.
//!
//! Installation is confirmed by reading `pip list --format=json` afterwards,
//! so the reported packages are what is actually present, not what was asked for.

use super::{ConfirmedPackages, EnvironmentHandle, InstalledPackage, PackageInstaller, command};
use crate::error::ToolError;
use std::collections::HashMap;
use std::process::Command;

/// Installs packages with `<env python> -m pip`.
#[derive(Debug, Clone)]
pub struct PipInstaller {
    upgrade_pip: bool,
}

impl PipInstaller {
    pub fn new(upgrade_pip: bool) -> Self {
        Self { upgrade_pip }
    }

    fn pip(env: &EnvironmentHandle) -> Command {
        let mut cmd = Command::new(&env.python);
        cmd.args(["-m", "pip", "--disable-pip-version-check"]);
        cmd
    }

    fn list_installed(env: &EnvironmentHandle) -> Result<Vec<InstalledPackage>, ToolError> {
        let mut cmd = Self::pip(env);
        cmd.args(["list", "--format=json"]);
        let output = command::run(cmd)?;
        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

impl Default for PipInstaller {
    fn default() -> Self {
        Self::new(true)
    }
}

/// PEP 503 normalization: lowercase, runs of `-`, `_`, `.` collapse to `-`.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('-');
            }
            in_separator = true;
        } else {
            normalized.push(c.to_ascii_lowercase());
            in_separator = false;
        }
    }
    normalized
}

/// Matches requested names against the installed list, preserving request order.
///
/// Fails with [`ToolError::Incomplete`] naming every requested package that is absent.
pub fn confirm(
    requested: &[String],
    installed: Vec<InstalledPackage>,
) -> Result<ConfirmedPackages, ToolError> {
    let mut by_name: HashMap<String, InstalledPackage> = installed
        .into_iter()
        .map(|p| (normalize_name(&p.name), p))
        .collect();

    let mut confirmed = Vec::with_capacity(requested.len());
    let mut missing = Vec::new();
    for name in requested {
        match by_name.remove(&normalize_name(name)) {
            Some(package) => confirmed.push(package),
            None => missing.push(name.as_str()),
        }
    }

    if !missing.is_empty() {
        return Err(ToolError::Incomplete(format!(
            "partial install, missing: {}",
            missing.join(", ")
        )));
    }
    Ok(ConfirmedPackages(confirmed))
}

impl PackageInstaller for PipInstaller {
    fn install(
        &self,
        env: &EnvironmentHandle,
        packages: &[String],
    ) -> Result<ConfirmedPackages, ToolError> {
        if self.upgrade_pip {
            let mut cmd = Self::pip(env);
            cmd.args(["install", "--upgrade", "pip"]);
            command::run(cmd)?;
            log::info!("Upgraded pip in {}", env.root.display());
        }

        if !packages.is_empty() {
            let mut cmd = Self::pip(env);
            cmd.arg("install").args(packages);
            command::run(cmd)?;
        }

        let confirmed = confirm(packages, Self::list_installed(env)?)?;
        log::info!("Confirmed {} installed packages", confirmed.0.len());
        Ok(confirmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str, version: &str) -> InstalledPackage {
        InstalledPackage {
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    #[test]
    fn normalizes_like_pep_503() {
        assert_eq!(normalize_name("Scikit_Learn"), "scikit-learn");
        assert_eq!(normalize_name("zope.interface"), "zope-interface");
        assert_eq!(normalize_name("a-_.b"), "a-b");
    }

    #[test]
    fn confirms_in_requested_order() {
        let requested = vec!["pandas".to_string(), "scikit-learn".to_string()];
        let installed = vec![
            pkg("pip", "24.0"),
            pkg("scikit_learn", "1.4.2"),
            pkg("pandas", "2.2.1"),
        ];
        let confirmed = confirm(&requested, installed).unwrap().into_inner();
        let names: Vec<&str> = confirmed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["pandas", "scikit_learn"]);
    }

    #[test]
    fn missing_package_is_partial_install() {
        let requested = vec!["numpy".to_string(), "seaborn".to_string()];
        let err = confirm(&requested, vec![pkg("numpy", "1.26.4")]).unwrap_err();
        assert!(err.to_string().contains("missing: seaborn"));
    }

    #[test]
    fn parses_pip_list_json() {
        let json = r#"[{"name": "numpy", "version": "1.26.4"}, {"name": "pip", "version": "24.0"}]"#;
        let parsed: Vec<InstalledPackage> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed[0], pkg("numpy", "1.26.4"));
    }
}
