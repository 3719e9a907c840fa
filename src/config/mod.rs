use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
    pub agents: AgentsConfig,
}

/// Bounds applied to reasoning strategies
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    /// Maximum ReAct iterations per run (always >= 1)
    pub max_iterations: usize,
    /// Maximum Tree-of-Thoughts depth (1..=10)
    pub max_depth: usize,
    /// Beam width kept per Tree-of-Thoughts expansion (1..=6)
    pub beam_width: usize,
    /// Program-of-Thought wall-clock budget in milliseconds
    pub program_timeout_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Multi-agent panel configuration
#[derive(Debug, Clone)]
pub struct AgentsConfig {
    /// Model identifier attached to default agent profiles
    pub model: String,
    /// Iteration budget for each agent's deliberation pass
    pub deliberation_iterations: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let limits = LimitsConfig {
            max_iterations: env::var("REASONING_MAX_ITERATIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5)
                .max(1),
            max_depth: env::var("REASONING_MAX_DEPTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3)
                .clamp(1, 10),
            beam_width: env::var("REASONING_BEAM_WIDTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3)
                .clamp(1, 6),
            program_timeout_ms: env::var("PROGRAM_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1000),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let agents = AgentsConfig {
            model: env::var("AGENT_MODEL").unwrap_or_else(|_| "reasoning-default-v1".to_string()),
            deliberation_iterations: env::var("AGENT_DELIBERATION_ITERATIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3)
                .max(1),
        };

        Config {
            limits,
            logging,
            agents,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limits: LimitsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
            agents: AgentsConfig::default(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            max_depth: 3,
            beam_width: 3,
            program_timeout_ms: 1000,
        }
    }
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            model: "reasoning-default-v1".to_string(),
            deliberation_iterations: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_defaults() {
        let limits = LimitsConfig::default();
        assert_eq!(limits.max_iterations, 5);
        assert_eq!(limits.max_depth, 3);
        assert_eq!(limits.beam_width, 3);
        assert_eq!(limits.program_timeout_ms, 1000);
    }

    #[test]
    fn test_config_default_logging() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_agents_defaults() {
        let agents = AgentsConfig::default();
        assert_eq!(agents.model, "reasoning-default-v1");
        assert_eq!(agents.deliberation_iterations, 3);
    }
}
