use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use eventhub_algo::config::{LogFormat, LoggingSettings, Settings};
use eventhub_algo::core::{GeoDataset, LocationSlugCodec, TieredSelector};
use eventhub_algo::models::ErrorResponse;
use eventhub_algo::routes::{self, AppState, LocationState};
use eventhub_algo::services::{AppwriteClient, CacheManager, FeedTtls, PostgresClient};
use std::sync::Arc;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug)]
pub struct JsonError(ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError(ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    })
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    JsonError(ErrorResponse {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    })
    .into()
}

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format {
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
        LogFormat::Full => subscriber.init(),
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Logging comes up before the config error is reported, so fall back to defaults
    let settings = Settings::load();
    init_logging(settings.as_ref().map(|s| &s.logging).unwrap_or(&LoggingSettings::default()));

    info!("Starting EventHub explore service...");

    let settings = settings.map_err(|e| startup_error("Failed to load configuration", e))?;

    info!("Configuration loaded successfully");

    // Reference dataset is loaded once and shared read-only
    let geo = Arc::new(
        GeoDataset::load(&settings.geo.dataset_path)
            .map_err(|e| startup_error("Failed to load geo dataset", e))?,
    );

    if geo.country(&settings.slug.country).is_none() {
        warn!("Slug country {} is not in the geo dataset, every slug will decode as invalid", settings.slug.country);
    }

    info!("Geo dataset loaded ({} countries)", geo.countries.len());

    let appwrite = Arc::new(
        AppwriteClient::new(
            settings.appwrite.endpoint,
            settings.appwrite.api_key,
            settings.appwrite.project_id,
            settings.appwrite.database_id,
            settings.collection.user_profiles,
        )
        .map_err(|e| startup_error("Failed to create Appwrite client", e))?,
    );

    info!("Appwrite client initialized");

    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);
    let ttls = FeedTtls::from_secs(
        settings.cache.featured_ttl_secs,
        settings.cache.popular_ttl_secs,
        settings.cache.categories_ttl_secs,
    );

    // Without Redis the cache is local to this instance
    let cache = match CacheManager::connect(&settings.cache.redis_url, l1_cache_size, ttls).await {
        Ok(cache) => cache,
        Err(e) => {
            warn!("Failed to connect to Redis ({}), caching in process only", e);
            CacheManager::in_memory(l1_cache_size, ttls)
        }
    };

    info!(
        "Cache manager initialized (L1: {} entries, shared: {}, TTL featured/popular/categories: {:?}/{:?}/{:?})",
        l1_cache_size,
        cache.is_shared(),
        ttls.featured,
        ttls.popular,
        ttls.categories
    );

    let cache = Arc::new(cache);

    let db_max_conn = settings.database.max_connections.unwrap_or(10);

    let postgres = Arc::new(
        PostgresClient::from_settings(
            &settings.database.url,
            Some(db_max_conn),
            settings.database.min_connections,
            settings.database.acquire_timeout_secs,
            settings.database.idle_timeout_secs,
        )
        .await
        .map_err(|e| startup_error("PostgreSQL connection error", e))?,
    );

    info!("PostgreSQL client initialized (max: {} connections)", db_max_conn);

    let selector = TieredSelector::new(settings.explore.location_match);

    info!(
        "Selector initialized (location match: {:?}, min pool: {}, featured limit: {})",
        selector.mode(),
        settings.explore.featured_min_pool,
        settings.explore.featured_limit
    );

    let locations = LocationState {
        geo,
        codec: LocationSlugCodec::new(settings.slug.country),
    };

    let app_state = AppState {
        appwrite,
        cache,
        postgres,
        selector,
        locations,
        explore: settings.explore,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::new(app_state.locations.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
