// src/main.rs

// --- Imports ---
use academico_admin::{config::Config, db, services::api_client::ApiClient, state::AppState, web};
use axum::serve;
use std::env;
use time::Duration;
use tokio::net::TcpListener;
use tower_sessions::ExpiredDeletion;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuração do Logging (Tracing) ---
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                env::var("RUST_LOG")
                    .unwrap_or_else(|_| "academico_admin=debug,tower_http=info,sqlx=warn,tower_sessions=info".into())
                    .into()
            }),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Iniciando painel de gestão acadêmica...");

    // --- Configuração ---
    let config = Config::from_env()
        .map_err(|e| anyhow::anyhow!("Configuração inválida: {}", e))?;
    tracing::info!(
        api = %config.api_base_url,
        timeout_secs = config.api_timeout.as_secs(),
        "⚙️ Configuração carregada"
    );

    // --- Cliente da API REST ---
    let api = ApiClient::new(&config.api_base_url, config.api_timeout)
        .map_err(|e| anyhow::anyhow!("Falha ao criar cliente da API: {}", e))?;

    // --- Configuração das Sessões ---
    let session_store = match db::create_session_store(&config.session_database_url).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("❌ Falha crítica ao preparar o store de sessões: {}", e);
            return Err(anyhow::anyhow!("Falha ao criar session store: {}", e));
        }
    };

    // Clone o store para a task de limpeza
    let session_store_clone = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = session_store_clone
            .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60))
            .await
        {
            tracing::error!("Erro na task de limpeza de sessões: {:?}", e);
        }
    });
    tracing::info!("🧹 Tarefa de limpeza de sessões iniciada.");

    // --- Criação do Estado da Aplicação ---
    let app_state = AppState { api };

    // --- Configuração do Endereço e Listener ---
    tracing::info!("📡 Servidor escutando em http://{}", config.bind_addr);
    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Falha ao iniciar listener em {}: {}", config.bind_addr, e);
            return Err(e.into());
        }
    };

    // --- Router com camadas de tracing e sessão ---
    let app = web::routes::create_app(
        app_state,
        session_store,
        Duration::hours(config.session_inactivity_hours),
    );
    tracing::info!("✅ Router e middlewares configurados.");

    // --- Início do Servidor ---
    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Erro fatal no servidor: {}", e);
        return Err(e.into());
    }

    Ok(())
}
