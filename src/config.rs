use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use std::env;
use std::fs;

/// Built-in configuration, used when no `--config` file is given. Every value
/// is read from the environment with a fallback.
pub const DEFAULT_CONFIG: &str = include_str!("../config.yaml");

pub const DEV_ORIGIN: &str = "http://localhost:5174";

#[derive(Parser, Debug)]
#[command(name = "feedbackd")]
#[command(about = "Runs the course feedback service", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    port: u16,
    #[serde(default = "default_frontend_url")]
    frontend_url: String,
}

fn default_frontend_url() -> String {
    DEV_ORIGIN.to_string()
}

fn default_sync_interval() -> u64 {
    60
}

impl App {
    pub fn get_port(&self) -> u16 {
        self.port
    }

    /// Origins allowed to make cross-origin requests, without duplicates.
    pub fn allowed_origins(&self) -> Vec<&str> {
        let mut origins = vec![DEV_ORIGIN];
        let frontend = self.frontend_url.trim();
        if !frontend.is_empty() && !origins.contains(&frontend) {
            origins.push(frontend);
        }
        origins
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Storage {
    database: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    auth_token: Option<String>,
    #[serde(default = "default_sync_interval")]
    pub sync_interval_seconds: u64,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Storage {
    pub fn get_db(&self) -> &str {
        &self.database
    }

    /// Remote url and token, present only when both are configured.
    pub fn replica(&self) -> Option<(&str, &str)> {
        match (non_empty(&self.url), non_empty(&self.auth_token)) {
            (Some(url), Some(token)) => Some((url, token)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub app: App,
    pub storage: Storage,
}

impl Config {
    pub fn new(path: &str) -> Result<Self> {
        let yaml_str = fs::read_to_string(path)?;
        Config::from_yaml_with(&yaml_str, |name| env::var(name).ok())
    }

    pub fn from_env() -> Result<Self> {
        Config::from_yaml_with(DEFAULT_CONFIG, |name| env::var(name).ok())
    }

    pub fn from_yaml_with<F>(yaml_str: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let yaml_with_env = substitute_vars(yaml_str, lookup);
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        Ok(config)
    }
}

/// Expands `${VAR}` and `${VAR:-default}` placeholders.
fn substitute_vars<F>(yaml_str: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = yaml_str.to_string();
    let mut offset = 0;

    while let Some(start) = result[offset..].find("${") {
        let actual_start = offset + start;
        let Some(end) = result[actual_start..].find('}') else {
            break;
        };
        let var_name = &result[actual_start + 2..actual_start + end];

        let value = match var_name.split_once(":-") {
            Some((name, default_val)) => lookup(name).unwrap_or_else(|| default_val.to_string()),
            None => lookup(var_name).unwrap_or_else(|| {
                tracing::warn!(var = var_name, "environment variable not found");
                String::new()
            }),
        };

        result.replace_range(actual_start..actual_start + end + 1, &value);
        offset = actual_start + value.len();
    }

    result
}
