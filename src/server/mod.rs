pub mod middleware;

use crate::{
    config::Config,
    database::{DatabaseManager, DatabaseManagerImpl},
    error::AppError,
    health::HealthService,
    report::{ReportService, TextGenerator},
    routes::{
        create_docs_routes, create_health_routes, create_product_routes, create_report_routes,
        create_sales_routes,
    },
    sales::SalesAggregator,
    server::middleware::request_response_logger,
};
use axum::{Router, middleware as axum_middleware};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Clone)]
pub struct Server {
    pub config: Arc<Config>,
    pub database: Arc<dyn DatabaseManager>,
    pub aggregator: SalesAggregator,
    pub report_service: Arc<ReportService>,
    pub health_service: Arc<HealthService>,
}

impl Server {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let report_service = ReportService::from_config(&config.report)?;
        Self::build(config, report_service).await
    }

    /// Build a server that writes reports with the given generator
    pub async fn with_text_generator(
        config: Config,
        generator: Arc<dyn TextGenerator>,
    ) -> Result<Self, AppError> {
        Self::build(config, ReportService::new(Some(generator))).await
    }

    async fn build(config: Config, report_service: ReportService) -> Result<Self, AppError> {
        let database_impl = Arc::new(DatabaseManagerImpl::new_from_config(&config).await?);
        let database: Arc<dyn DatabaseManager> = database_impl.clone();

        let report_service = Arc::new(report_service);

        let health_service = Arc::new(HealthService::new());
        health_service.register(database_impl).await;
        health_service.register(report_service.clone()).await;

        let aggregator = SalesAggregator::new(config.dashboard.clone());

        Ok(Self {
            config: Arc::new(config),
            database,
            aggregator,
            report_service,
            health_service,
        })
    }

    pub async fn run(&self) -> Result<(), AppError> {
        if self.config.database.migration_on_startup {
            info!("Running database migrations");
            self.database.migrate().await?;
            info!("Database migrations completed successfully");
        }

        let app = self.create_app();

        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bind to address: {}", e)))?;

        info!("Server listening on http://{}", addr);

        let result = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await;

        if let Err(e) = result {
            error!("Server error: {}", e);
            return Err(AppError::Internal(format!("Server error: {}", e)));
        }

        info!("Server shutdown complete");
        Ok(())
    }

    // Creates an application router
    pub fn create_app(&self) -> Router {
        let mut app = Router::new()
            .nest("/health", create_health_routes())
            .nest(
                "/api",
                create_sales_routes()
                    .merge(create_product_routes())
                    .merge(create_report_routes())
                    .merge(create_docs_routes()),
            )
            .with_state(self.clone());

        if self.config.logging.log_request {
            app = app.layer(axum_middleware::from_fn(request_response_logger));
        }
        app
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Graceful shutdown initiated");
}
