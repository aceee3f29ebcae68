use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CtfConfig {
    pub shell: ShellConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Printed by `whoami`.
    pub user: String,
    /// User part of the prompt.
    pub prompt_user: String,
    pub host: String,
    /// Prompt template. Placeholders: `{user}`, `{host}`, `{cwd}` and the
    /// colour names `{red}`, `{green}`, `{blue}`, `{yellow}`, `{cyan}`,
    /// `{magenta}`, `{bold}`, `{reset}`.
    pub prompt: String,
    /// Initial working directory.
    pub home: String,
    /// First scrollback block of every session.
    pub welcome: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            user: "user".to_string(),
            prompt_user: "ctf".to_string(),
            host: "react".to_string(),
            prompt: "{green}{user}@{host}{reset}:{magenta}{cwd}{reset}$ ".to_string(),
            home: "/home/user".to_string(),
            welcome: "Welcome to Capture the Flag Terminal! Type \"help\" for commands."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Extra `EnvFilter` directives, e.g. `ctfsh=debug`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            filter: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl LoggingConfig {
    /// Filter directives for `tracing_subscriber::EnvFilter`.
    pub fn directives(&self) -> String {
        if self.filter.is_empty() {
            self.level.as_str().to_string()
        } else {
            format!("{},{}", self.level.as_str(), self.filter)
        }
    }
}
