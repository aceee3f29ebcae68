use crate::{ConfigError, CtfConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use tracing::debug;

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

pub struct ConfigLoader {
    explicit_file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        if let Some(home) = dirs::home_dir() {
            search_paths.push(home.join(".config/ctfsh/ctfsh.yaml"));
        }
        search_paths.push(PathBuf::from("./ctfsh.yaml"));

        #[cfg(unix)]
        search_paths.insert(0, PathBuf::from("/etc/ctfsh/ctfsh.yaml"));

        Self {
            explicit_file: None,
            search_paths,
        }
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.explicit_file = Some(PathBuf::from(path));
        self
    }

    /// Replaces the default search locations.
    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.search_paths = paths;
        self
    }

    pub fn load(&self) -> Result<CtfConfig, ConfigError> {
        let mut config = CtfConfig::default();

        if let Ok(env_path) = std::env::var("CTFSH_CONFIG") {
            config = self.read_file(&PathBuf::from(env_path))?;
        } else if let Some(ref explicit) = self.explicit_file {
            config = self.read_file(explicit)?;
        } else {
            for path in &self.search_paths {
                if path.exists() {
                    if let Ok(content) = std::fs::read_to_string(path) {
                        debug!(path = %path.display(), "merging config file");
                        config = self.merge_yaml(&config, &content)?;
                    }
                }
            }
        }

        self.apply_env_overrides(&mut config);
        validate(&config)?;
        Ok(config)
    }

    fn read_file(&self, path: &PathBuf) -> Result<CtfConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        })?;
        debug!(path = %path.display(), "loading config file");
        self.parse_yaml(&content)
    }

    fn parse_yaml(&self, content: &str) -> Result<CtfConfig, ConfigError> {
        let expanded = self.expand_env_vars(content);
        Ok(serde_yaml::from_str(&expanded)?)
    }

    fn merge_yaml(&self, base: &CtfConfig, content: &str) -> Result<CtfConfig, ConfigError> {
        let overlay = self.parse_yaml(content)?;
        Ok(self.merge_configs(base, &overlay))
    }

    /// Fields of `overlay` that differ from the compiled defaults win.
    fn merge_configs(&self, base: &CtfConfig, overlay: &CtfConfig) -> CtfConfig {
        let mut result = base.clone();
        let defaults = CtfConfig::default();

        if overlay.shell.user != defaults.shell.user {
            result.shell.user = overlay.shell.user.clone();
        }
        if overlay.shell.prompt_user != defaults.shell.prompt_user {
            result.shell.prompt_user = overlay.shell.prompt_user.clone();
        }
        if overlay.shell.host != defaults.shell.host {
            result.shell.host = overlay.shell.host.clone();
        }
        if overlay.shell.prompt != defaults.shell.prompt {
            result.shell.prompt = overlay.shell.prompt.clone();
        }
        if overlay.shell.home != defaults.shell.home {
            result.shell.home = overlay.shell.home.clone();
        }
        if overlay.shell.welcome != defaults.shell.welcome {
            result.shell.welcome = overlay.shell.welcome.clone();
        }
        if overlay.logging != defaults.logging {
            result.logging = overlay.logging.clone();
        }

        result
    }

    fn expand_env_vars(&self, content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_default()
            })
            .to_string()
    }

    fn apply_env_overrides(&self, config: &mut CtfConfig) {
        if let Ok(user) = std::env::var("CTFSH_USER") {
            if !user.is_empty() {
                config.shell.user = user;
            }
        }
        if let Ok(host) = std::env::var("CTFSH_HOST") {
            if !host.is_empty() {
                config.shell.host = host;
            }
        }
        if let Ok(home) = std::env::var("CTFSH_HOME") {
            if !home.is_empty() {
                config.shell.home = home;
            }
        }
        if let Ok(level) = std::env::var("CTFSH_LOG_LEVEL") {
            if let Ok(l) = serde_yaml::from_str(&level) {
                config.logging.level = l;
            }
        }
    }
}

fn validate(config: &CtfConfig) -> Result<(), ConfigError> {
    if !config.shell.home.starts_with('/') {
        return Err(ConfigError::InvalidValue(format!(
            "shell.home must be an absolute path, got '{}'",
            config.shell.home
        )));
    }
    if config.shell.user.trim().is_empty() {
        return Err(ConfigError::InvalidValue("shell.user must not be empty".to_string()));
    }
    Ok(())
}
