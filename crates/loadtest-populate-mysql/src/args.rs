//! CLI argument definitions for the MySQL loader.

use crate::config::MySQLConnectionConfig;
use clap::Args;

// Re-export CommonPopulateArgs for convenience
pub use loadtest_populate::CommonPopulateArgs;

/// MySQL-specific populate arguments.
#[derive(Args, Clone, Debug)]
pub struct MySQLPopulateArgs {
    /// MySQL server host name or IP address
    #[arg(long, env = "MYSQL_HOST", default_value = "127.0.0.1")]
    pub mysql_host: String,

    /// MySQL server port
    #[arg(long, env = "MYSQL_PORT", default_value = "3306")]
    pub mysql_port: u16,

    /// MySQL user
    #[arg(long, env = "MYSQL_USER", default_value = "root")]
    pub mysql_user: String,

    /// MySQL password
    #[arg(long, env = "MYSQL_PASSWORD", default_value = "", hide_env_values = true)]
    pub mysql_password: String,

    /// Database holding the target table
    #[arg(long, env = "MYSQL_DATABASE")]
    pub mysql_database: String,

    #[command(flatten)]
    pub common: CommonPopulateArgs,
}

impl MySQLPopulateArgs {
    pub fn connection_config(&self) -> MySQLConnectionConfig {
        MySQLConnectionConfig {
            host: self.mysql_host.clone(),
            port: self.mysql_port,
            user: self.mysql_user.clone(),
            password: self.mysql_password.clone(),
            database: self.mysql_database.clone(),
        }
    }
}
