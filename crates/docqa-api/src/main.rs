use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docqa_api::config::ApiConfig;
use docqa_api::router::create_router;
use docqa_api::state::AppState;
use docqa_core::config::PipelineConfig;
use docqa_llm::OpenAiClient;
use docqa_pipeline::RagPipeline;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docqa_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = ApiConfig::from_env();

    let mut pipeline_config = PipelineConfig::with_defaults();
    if let Some(path) = &api_config.config_file {
        pipeline_config = match pipeline_config.load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration file");
                std::process::exit(1);
            }
        };
    }
    let pipeline_config = pipeline_config.load_from_env();

    let api_key = match &api_config.openai_api_key {
        Some(key) => key.clone(),
        None => {
            tracing::warn!(
                "OPENAI_API_KEY is not set; embedding and generation calls will fail \
                 until it is provided"
            );
            String::new()
        }
    };

    let client = Arc::new(OpenAiClient::new(
        api_key,
        pipeline_config.embedding_model.value.clone(),
        pipeline_config.chat_model.value.clone(),
    ));

    let pipeline = match RagPipeline::new(client.clone(), client, &pipeline_config) {
        Ok(pipeline) => Arc::new(pipeline),
        Err(e) => {
            tracing::error!(error = %e, "Invalid pipeline configuration");
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = api_config.port,
        upload_dir = %api_config.upload_dir.display(),
        embedding_model = %pipeline_config.embedding_model.value,
        chat_model = %pipeline_config.chat_model.value,
        "Starting DocQA API server"
    );

    let state = AppState::new(pipeline, api_config.upload_dir.clone());

    let cors = match api_config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]),
        Err(_) => {
            tracing::error!(origin = %api_config.cors_origin, "Invalid CORS origin");
            std::process::exit(1);
        }
    };

    let app = create_router(state).layer(TraceLayer::new_for_http()).layer(cors);

    let addr = api_config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
