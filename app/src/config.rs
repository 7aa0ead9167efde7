use std::time::Duration;

use clap::Parser;

/// Terminal todo list backed by a remote todo service.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo", version, about)]
pub struct AppConfig {
    /// Base URL of the todo service
    #[arg(long, env = "TODO_API_URL", default_value = "http://127.0.0.1:3000")]
    pub api_url: String,

    /// Owner id every item is created under and listed by
    #[arg(long, env = "TODO_USER_ID", default_value_t = 1091)]
    pub user_id: i64,

    /// How long an error stays on screen, in milliseconds
    #[arg(long, env = "TODO_ERROR_TIMEOUT_MS", default_value_t = 3000)]
    pub error_timeout_ms: u64,
}

impl AppConfig {
    pub fn error_timeout(&self) -> Duration {
        Duration::from_millis(self.error_timeout_ms)
    }
}
