//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/grind75/grind75.toml`
//! 3. Local config: `<project_dir>/.grind75.toml`
//! 4. Environment variables: `GRIND75_*` prefix
//!
//! Settings are resolved once at startup and handed to every service.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// External toolchain used to test and run solutions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Toolchain executable (e.g. "go")
    pub program: String,
    /// Arguments for testing the whole tree (run in the project directory)
    pub test_all_args: Vec<String>,
    /// Arguments for testing one problem; the problem directory is appended
    pub test_args: Vec<String>,
    /// Arguments for running a solution; the solution file is appended
    pub run_args: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            program: "go".into(),
            test_all_args: vec!["test".into(), "./...".into()],
            test_args: vec!["test".into()],
            run_args: vec!["run".into()],
        }
    }
}

/// Raw toolchain config for intermediate parsing (None = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawToolchainConfig {
    pub program: Option<String>,
    pub test_all_args: Option<Vec<String>>,
    pub test_args: Option<Vec<String>>,
    pub run_args: Option<Vec<String>>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub problems_dir: Option<PathBuf>,
    pub template_dir: Option<PathBuf>,
    pub template_files: Option<Vec<String>>,
    pub solution_file: Option<String>,
    #[serde(default)]
    pub toolchain: RawToolchainConfig,
}

impl ToolchainConfig {
    /// Overlay wins where specified; arrays are replaced, not merged.
    pub fn merge(&self, overlay: &RawToolchainConfig) -> Self {
        Self {
            program: overlay
                .program
                .clone()
                .unwrap_or_else(|| self.program.clone()),
            test_all_args: overlay
                .test_all_args
                .clone()
                .unwrap_or_else(|| self.test_all_args.clone()),
            test_args: overlay
                .test_args
                .clone()
                .unwrap_or_else(|| self.test_args.clone()),
            run_args: overlay
                .run_args
                .clone()
                .unwrap_or_else(|| self.run_args.clone()),
        }
    }
}

/// Unified configuration for grind75.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Root of the per-problem directories (default: problems)
    pub problems_dir: PathBuf,
    /// Directory holding the template files (default: problems/template)
    pub template_dir: PathBuf,
    /// Template file names copied into every new problem
    pub template_files: Vec<String>,
    /// Solution file inside a problem directory (used by `run`)
    pub solution_file: String,
    /// External toolchain
    pub toolchain: ToolchainConfig,
    /// Emit diagnostic traces (from GRIND75_DEBUG or --verbose only)
    #[serde(skip)]
    pub debug: bool,
    /// Directory relative paths are resolved against (None = cwd)
    #[serde(skip)]
    pub project_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            problems_dir: PathBuf::from("problems"),
            template_dir: PathBuf::from("problems").join("template"),
            template_files: vec![
                "solution.go".into(),
                "solution_test.go".into(),
                "README.md".into(),
            ],
            solution_file: "solution.go".into(),
            toolchain: ToolchainConfig::default(),
            debug: false,
            project_dir: None,
        }
    }
}

/// Get the XDG config directory for grind75.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "grind75").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("grind75.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: Option<&Path>) -> PathBuf {
    project_dir
        .map(Path::to_path_buf)
        .unwrap_or_default()
        .join(".grind75.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Resolve a configured path against the project directory.
    pub fn anchor(&self, path: &Path) -> PathBuf {
        match &self.project_dir {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Problems root as seen from the current process.
    pub fn problems_root(&self) -> PathBuf {
        self.anchor(&self.problems_dir)
    }

    /// Template directory as seen from the current process.
    pub fn template_root(&self) -> PathBuf {
        self.anchor(&self.template_dir)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.problems_dir = PathBuf::from(expand_env_vars(&self.problems_dir.to_string_lossy()));
        self.template_dir = PathBuf::from(expand_env_vars(&self.template_dir.to_string_lossy()));
        self.toolchain.program = expand_env_vars(&self.toolchain.program);
    }

    /// Overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            problems_dir: overlay
                .problems_dir
                .clone()
                .unwrap_or_else(|| self.problems_dir.clone()),
            template_dir: overlay
                .template_dir
                .clone()
                .unwrap_or_else(|| self.template_dir.clone()),
            template_files: overlay
                .template_files
                .clone()
                .unwrap_or_else(|| self.template_files.clone()),
            solution_file: overlay
                .solution_file
                .clone()
                .unwrap_or_else(|| self.solution_file.clone()),
            toolchain: self.toolchain.merge(&overlay.toolchain),
            debug: self.debug,
            project_dir: self.project_dir.clone(),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory (default: cwd); holds the
    ///   local config and anchors relative paths
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), project_dir, None)
    }

    /// Load settings from explicit layers.
    ///
    /// `global_path` replaces the XDG lookup; `env` replaces the process
    /// environment as the source of `GRIND75_*` overrides (None = read it).
    pub fn load_layers(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self {
            project_dir: project_dir.map(Path::to_path_buf),
            ..Self::default()
        };

        if let Some(global_path) = global_path {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        let local_path = local_config_path(project_dir);
        if local_path.exists() {
            let raw = load_raw_settings(&local_path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current, env)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply GRIND75_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__` (`GRIND75_TOOLCHAIN__PROGRAM`), lists are comma separated.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("GRIND75")
                .source(env)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("template_files")
                .with_list_parse_key("toolchain.test_all_args")
                .with_list_parse_key("toolchain.test_args")
                .with_list_parse_key("toolchain.run_args"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("problems_dir") {
            settings.problems_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("template_dir") {
            settings.template_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get::<Vec<String>>("template_files") {
            settings.template_files = val;
        }
        if let Ok(val) = config.get_string("solution_file") {
            settings.solution_file = val;
        }
        if let Ok(val) = config.get_string("toolchain.program") {
            settings.toolchain.program = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("toolchain.test_all_args") {
            settings.toolchain.test_all_args = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("toolchain.test_args") {
            settings.toolchain.test_args = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("toolchain.run_args") {
            settings.toolchain.run_args = val;
        }
        if let Ok(val) = config.get_string("debug") {
            settings.debug = !val.is_empty();
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# grind75 configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/grind75/grind75.toml
#   Local:  <project_dir>/.grind75.toml
#   Env:    GRIND75_* environment variables (GRIND75_TOOLCHAIN__PROGRAM=go)
#
# Relative paths are resolved against the project directory.

# Root of the per-problem directories
# problems_dir = "problems"

# Directory holding the template files
# template_dir = "problems/template"

# Template files copied into every new problem
# template_files = ["solution.go", "solution_test.go", "README.md"]

# Solution file shown/executed by `grind75 run`
# solution_file = "solution.go"

[toolchain]
# program = "go"
# test_all_args = ["test", "./..."]
# test_args = ["test"]
# run_args = ["run"]
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
