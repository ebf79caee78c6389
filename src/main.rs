use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use dotenvy::dotenv;

use bus_station::config::environment::EnvironmentConfig;
use bus_station::database::DatabaseConnection;
use bus_station::middleware::cors::cors_middleware;
use bus_station::repositories::{MemoryRouteRepository, RouteRepository, RouteStorage};
use bus_station::routes::create_route_router;
use bus_station::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚌 Bus Station - API de rutas y venta de billetes");
    info!("=================================================");

    let config = EnvironmentConfig::default();

    // Elegir storage: PostgreSQL si hay DATABASE_URL, memoria si no
    let storage: Arc<dyn RouteStorage> = if std::env::var("DATABASE_URL").is_ok() {
        let db_connection = match DatabaseConnection::new_default().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("❌ Error conectando a la base de datos: {}", e);
                return Err(anyhow::anyhow!("Error de base de datos: {}", e));
            }
        };
        db_connection.run_migrations().await?;
        info!("✅ PostgreSQL conectado exitosamente");
        Arc::new(RouteRepository::new(db_connection.pool().clone()))
    } else {
        warn!("⚠️ DATABASE_URL no definida, usando storage en memoria");
        Arc::new(MemoryRouteRepository::new())
    };

    // Crear router de la API
    let app_state = AppState::new(storage, config.clone());

    let app = Router::new()
        .merge(create_route_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("   GET    /routes - Listar rutas");
    info!("   GET    /routes/:id - Obtener ruta");
    info!("   POST   /routes/add - Crear ruta");
    info!("   DELETE /routes/:id - Eliminar ruta");
    info!("   GET    /route_search?date=YYYY-MM-DD&point=X - Buscar rutas");
    info!("   POST   /routes/buy/:id - Comprar billete");
    if config.is_development() {
        info!("🛠️ Modo desarrollo activo");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
