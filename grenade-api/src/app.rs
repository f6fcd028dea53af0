/// Application state and router builder
///
/// Defines the shared state handed to every handler and assembles the Axum
/// router with its middleware stack.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use grenade_api::{app::{build_router, AppState}, config::Config};
/// use grenade_shared::auth::mailer::LogMailer;
/// use grenade_shared::generate::MockGenerator;
/// use grenade_shared::store::MemoryStore;
///
/// let state = AppState::new(
///     Arc::new(MemoryStore::new()),
///     Arc::new(MockGenerator::default()),
///     Arc::new(LogMailer),
///     Config::for_tests(),
/// );
/// let app = build_router(state);
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
    Router,
};
use grenade_shared::auth::{
    jwt,
    mailer::LinkMailer,
    middleware::{bearer_token, AuthContext},
};
use grenade_shared::generate::TextGenerator;
use grenade_shared::library::Library;
use grenade_shared::store::ContentStore;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned per request via Axum's `State` extractor; every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend (PostgreSQL or in-memory)
    pub store: Arc<dyn ContentStore>,

    /// Remote suggestion generator
    pub generator: Arc<dyn TextGenerator>,

    /// Login-link delivery
    pub mailer: Arc<dyn LinkMailer>,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ContentStore>,
        generator: Arc<dyn TextGenerator>,
        mailer: Arc<dyn LinkMailer>,
        config: Config,
    ) -> Self {
        Self {
            store,
            generator,
            mailer,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Item library for the caller's workspace
    pub fn library(&self, auth: &AuthContext) -> Library<dyn ContentStore> {
        Library::new(Arc::clone(&self.store), auth.workspace_id)
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /health                    # Health check (public)
/// ├── POST /api/generate              # AI suggestions (public)
/// └── /v1/
///     ├── /auth/
///     │   ├── POST /magic-link        # public
///     │   ├── POST /verify            # public
///     │   ├── POST /refresh           # public
///     │   ├── GET  /session           # authenticated
///     │   └── POST /sign-out          # authenticated
///     ├── /items                      # authenticated
///     │   ├── GET    /                # ?q= search
///     │   ├── POST   /
///     │   ├── PUT    /:id
///     │   ├── DELETE /:id
///     │   └── GET    /:id/suggestions
///     └── GET /library/options        # authenticated
/// ```
///
/// # Middleware Stack
///
/// 1. Security headers
/// 2. CORS (tower-http CorsLayer)
/// 3. Logging (tower-http TraceLayer)
/// 4. Authentication (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/generate", post(routes::generate::generate))
        .route("/v1/auth/magic-link", post(routes::auth::request_magic_link))
        .route("/v1/auth/verify", post(routes::auth::verify))
        .route("/v1/auth/refresh", post(routes::auth::refresh));

    let private_routes = Router::new()
        .route("/v1/auth/session", get(routes::auth::session))
        .route("/v1/auth/sign-out", post(routes::auth::sign_out))
        .route(
            "/v1/items",
            get(routes::items::list_items).post(routes::items::create_item),
        )
        .route(
            "/v1/items/:id",
            put(routes::items::update_item).delete(routes::items::delete_item),
        )
        .route("/v1/items/:id/suggestions", get(routes::items::item_suggestions))
        .route("/v1/library/options", get(routes::items::library_options))
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_layer));

    let cors = if state.config.api.cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(public_routes)
        .merge(private_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// Validates the bearer access token and injects [`AuthContext`]
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req)?;
    let claims = jwt::validate_access_token(token, state.jwt_secret())?;

    req.extensions_mut().insert(AuthContext::from_claims(&claims));

    Ok(next.run(req).await)
}
