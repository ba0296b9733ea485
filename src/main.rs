use assessment_backend::{
    config::Config,
    database::pool::create_pool,
    routes, AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let config = Config::from_env()?;

    let pool = create_pool(&config).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    tokio::fs::create_dir_all(&config.uploads_dir).await?;
    info!("Serving uploads from: {}", config.uploads_dir);

    let server_address = config.server_address.clone();
    let uploads_dir = config.uploads_dir.clone();
    let app_state = AppState::new(config, pool);

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .route("/test/start/:question_set_id", get(routes::test::start_test))
        .route("/test/create_session", post(routes::test::create_session))
        .route("/test/save_violations", post(routes::test::save_violations))
        .route("/test/submit_section", post(routes::test::submit_section))
        .route("/test/save_details", post(routes::test::save_details))
        .route("/upload_audio", post(routes::uploads::upload_audio))
        .route("/upload_video", post(routes::uploads::upload_video))
        .route("/questions/save", post(routes::questions::save_questions))
        .route("/questions/generate", post(routes::questions::generate_question))
        .nest_service("/uploads", tower_http::services::ServeDir::new(uploads_dir))
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024));

    let addr: SocketAddr = server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
