use dreamers::config::Config;
use dreamers::lifecycle;
use dreamers::routes;
use dreamers::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env().expect("invalid configuration");
    let addr = config.listen_addr();
    let api_base = config.api_base_url.clone();
    let state = AppState::in_memory(config);
    let _sweeper = lifecycle::spawn_sweeper(state.clone());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, %api_base, "dreamers listening");
    axum::serve(listener, app).await.expect("server failed");
}
