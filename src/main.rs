use tokio::net::TcpListener;
use tracing::info;
use pinterest_proxy::{
    config::Config,
    api::routes::create_router,
    logging,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = Config::load()?;
    let server_addr = config.server_addr;

    let app_state = AppState::new(&config)?;
    info!(downloader = app_state.downloader.base_url(), "using downloader endpoint");

    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    info!(address = %server_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
