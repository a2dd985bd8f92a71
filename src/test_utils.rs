use crate::{config::Config, report::TextGenerator, server::Server};
use std::sync::Arc;

/// Test server builder backed by an in-memory SQLite database
pub struct TestServerBuilder {
    config: Config,
    use_memory_db: bool,
    text_generator: Option<Arc<dyn TextGenerator>>,
}

impl TestServerBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            use_memory_db: true,
            text_generator: None,
        }
    }

    /// Keep the database URL from the supplied configuration
    pub fn with_real_database(mut self) -> Self {
        self.use_memory_db = false;
        self
    }

    /// Set a custom configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Write reports with this generator instead of the configured API
    pub fn with_text_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.text_generator = Some(generator);
        self
    }

    /// Build the server and run migrations
    pub async fn build(self) -> Server {
        let mut config = self.config;

        if self.use_memory_db {
            config.database.url = "sqlite::memory:".to_string();
        }
        config.logging.log_request = false;

        let server = match self.text_generator {
            Some(generator) => Server::with_text_generator(config, generator).await,
            None => {
                // Never reach a real API from tests
                config.report.api_key = None;
                Server::new(config).await
            }
        }
        .unwrap();

        server.database.migrate().await.unwrap();
        server
    }
}

impl Default for TestServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
