use anyhow::Result;
use folio_axum::{ApiApp, ApiConfig, ApiState};
use folio_store::{DocumentStore, StoreConfig};

struct ServerDefaults;

impl ServerDefaults {
    const HOST: &'static str = "127.0.0.1";
    const PORT: u16 = 3001;
    const STORE_ROOT: &'static str = "data/documents";
    const MAX_DOCUMENT_MB: u64 = 800;
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let root = env_var_or("FOLIO_STORE_ROOT", ServerDefaults::STORE_ROOT.to_string());
    let max_mb = env_var_or("FOLIO_MAX_DOCUMENT_MB", ServerDefaults::MAX_DOCUMENT_MB);

    tokio::fs::create_dir_all(&root).await?;
    let store = DocumentStore::new(
        StoreConfig::new(&root).with_max_document_bytes(max_mb * 1024 * 1024),
    )?;
    tracing::info!("Serving documents from {} (cap {} MiB)", root, max_mb);

    let config = match std::env::var("FOLIO_CORS_ORIGIN") {
        Ok(origin) => ApiConfig::new().with_cors_origin(origin),
        Err(_) => ApiConfig::new(),
    };
    let ax = ApiApp::new(ApiState::new(store), config);

    let host = env_var_or("HTTP_HOST", ServerDefaults::HOST.to_string());
    let port = env_var_or("HTTP_PORT", ServerDefaults::PORT);
    let addr = format!("{host}:{port}");

    println!("[folio] listening on http://{addr}");

    ax.listen(addr).await?;

    Ok(())
}

fn env_var_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
    T::Err: std::fmt::Debug,
{
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or(default)
}
