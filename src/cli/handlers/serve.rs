//! `serve`: validate the configuration, then run the HTTP server.

use crate::config::Settings;
use crate::error::AppResult;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Runs the server until shutdown, or only validates with `dry_run`.
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        self.config.validate()?;

        if dry_run {
            self.report_dry_run();
            return Ok(());
        }

        Server::new(self.config).run().await?;
        Ok(())
    }

    fn report_dry_run(&self) {
        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ Database pool: {}..{} connections",
            self.config.database.min_connections, self.config.database.max_connections
        );
        println!("✓ Logger level: {}", self.config.logger.level);
        println!("Dry run completed successfully");
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
