use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use order_service::application::order_service::OrderService;
use order_service::config::AppConfig;
use order_service::infrastructure::{
    DieselOrderRepository, GrpcCatalogLookup, GrpcCustomerLookup,
};
use order_service::{build_server, create_pool, run_migrations, serve_grpc};
use tokio::signal;

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("failed to listen for SIGINT: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => log::info!("received SIGINT, shutting down"),
        () = terminate => log::info!("received SIGTERM, shutting down"),
    }
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, &config.pool)?;
    run_migrations(&pool)?;

    let customers =
        GrpcCustomerLookup::connect_lazy(&config.customer_service_url, config.remote_timeout)?;
    let catalog =
        GrpcCatalogLookup::connect_lazy(&config.catalog_service_url, config.remote_timeout)?;
    let service = Arc::new(OrderService::new(
        Arc::new(DieselOrderRepository::new(pool)),
        Arc::new(customers),
        Arc::new(catalog),
    ));

    let grpc_addr: SocketAddr = config.grpc_addr().parse()?;
    log::info!("Starting HTTP server at http://{}", config.http_addr());
    log::info!("Starting gRPC server at {grpc_addr}");

    let http = build_server(service.clone(), &config.host, config.http_port)?;
    let grpc = serve_grpc(service, grpc_addr, shutdown_signal());

    let (http_result, grpc_result) = tokio::join!(http, grpc);
    http_result?;
    grpc_result?;
    Ok(())
}
