pub mod dashboards;
pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use shared::format::format_number;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Создаем директорию для логов
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,reqwest=warn,hyper=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    // Простой middleware для логирования запросов
    async fn request_logger(req: Request<Body>, next: Next) -> Response {
        use axum::body::to_bytes;
        use chrono::Local;

        let start = std::time::Instant::now();
        let method = req.method().clone();
        let uri = req.uri().clone();

        let response = next.run(req).await;

        let (parts, body) = response.into_parts();

        // Читаем тело ответа, чтобы узнать реальный размер
        let bytes = match to_bytes(body, usize::MAX).await {
            Ok(b) => b,
            Err(_) => {
                tracing::warn!(
                    "{} {} -> {} | {}ms | body unreadable",
                    method,
                    uri.path(),
                    parts.status.as_u16(),
                    start.elapsed().as_millis()
                );
                return Response::from_parts(parts, Body::default());
            }
        };

        // голубой для 200, коричневый для остальных
        let color_code = if parts.status.is_success() { "36" } else { "33" };

        println!(
            "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
            color_code,
            Local::now().format("%H:%M:%S"),
            start.elapsed().as_millis(),
            format_number(bytes.len()),
            parts.status.as_u16(),
            method,
            uri.path()
        );

        Response::from_parts(parts, Body::from(bytes))
    }

    let config = shared::config::load_config()?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    shared::config::init(config);

    // Прогреваем кэш: первый запрос не ждет загрузку таблицы
    let snapshot = domain::a001_vehicle::service::current_snapshot().await;
    match &snapshot.load_error {
        Some(message) => tracing::warn!("Initial source load failed: {}", message),
        None => tracing::info!(
            "Initial source load: {} rows, {} columns",
            format_number(snapshot.records.len()),
            snapshot.headers.len()
        ),
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::configure_routes()
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
