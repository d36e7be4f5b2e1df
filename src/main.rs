// src/main.rs

use reposicoes::state::{AppConfig, AppState};
use reposicoes::{db, web};
use axum::serve;
use std::{env, net::SocketAddr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Logging (Tracing) ---
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                env::var("RUST_LOG")
                    .unwrap_or_else(|_| "reposicoes=debug,tower_http=info,sqlx=warn".into())
                    .into()
            }),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Iniciando o servidor de reposições...");

    // --- Base de dados ---
    let db_pool = match db::create_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Falha crítica ao inicializar a base de dados: {}", e);
            return Err(anyhow::anyhow!("Falha ao conectar/migrar DB: {}", e));
        }
    };

    // --- Configuração (segredo do JWT) ---
    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("!!! Variável de ambiente JWT_SECRET não definida: {}", e))?;
    tracing::info!("🔑 Configuração de autenticação carregada.");

    let app_state = AppState { db_pool, config };

    // --- Listener ---
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("📡 Servidor escutando em http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Falha ao iniciar listener na porta 3000: {}", e);
            return Err(e.into());
        }
    };

    // --- Router e middlewares globais ---
    let app = web::routes::create_router(app_state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    tracing::info!("👂 Servidor pronto para aceitar conexões...");
    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Erro fatal no servidor: {}", e);
        return Err(e.into());
    }

    Ok(())
}
