//! ctfsh Configuration
//!
//! YAML configuration for the capture-the-flag shell.
//!
//! # Configuration Loading Priority
//!
//! 1. Compiled-in defaults
//! 2. `/etc/ctfsh/ctfsh.yaml` (system-wide)
//! 3. `~/.config/ctfsh/ctfsh.yaml` (user)
//! 4. `./ctfsh.yaml` (project-local)
//! 5. `CTFSH_CONFIG=/path/to/config.yaml` or `--config` (explicit, replaces 2-4)
//! 6. Environment variables (highest priority)
//!
//! # Example Configuration
//!
//! ```yaml
//! shell:
//!   user: "${USER}"
//!   host: box
//!   home: /home/user
//!
//! logging:
//!   level: debug
//! ```

#![allow(missing_docs)]

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::*;

/// Load configuration from default locations.
///
/// Searches for config files in order and merges them.
/// Environment variables override file values.
pub fn load() -> Result<CtfConfig, ConfigError> {
    ConfigLoader::new().load()
}

/// Load configuration from a specific file.
pub fn load_from_file(path: &str) -> Result<CtfConfig, ConfigError> {
    ConfigLoader::new().with_file(path).load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CtfConfig::default();
        assert_eq!(config.shell.user, "user");
        assert_eq!(config.shell.home, "/home/user");
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn default_prompt_matches_documented_layout() {
        let config = CtfConfig::default();
        assert_eq!(
            config.shell.prompt,
            "{green}{user}@{host}{reset}:{magenta}{cwd}{reset}$ "
        );
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = r#"
shell:
  host: box
"#;
        let config: CtfConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.shell.host, "box");
        assert_eq!(config.shell.user, "user"); // default
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
shell:
  user: player
  prompt_user: ctf
  host: lab
  prompt: "{user}:{cwd}> "
  home: /tmp
  welcome: "hello"

logging:
  level: debug
  format: json
  filter: "ctf_core=trace"
"#;
        let config: CtfConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.shell.user, "player");
        assert_eq!(config.shell.prompt, "{user}:{cwd}> ");
        assert_eq!(config.shell.home, "/tmp");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.directives(), "debug,ctf_core=trace");
    }
}
