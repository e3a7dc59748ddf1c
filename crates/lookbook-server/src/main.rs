use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use lookbook_api::auth::{self, AppState, AppStateInner};
use lookbook_api::middleware::require_auth;
use lookbook_api::{comments, items, looks, posts};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "lookbook_server=debug,lookbook_api=debug,lookbook_db=debug,tower_http=debug"
                        .into()
                }),
        )
        .init();

    // Config
    let db_path = std::env::var("LOOKBOOK_DB_PATH").unwrap_or_else(|_| "lookbook.db".into());
    let host = std::env::var("LOOKBOOK_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("LOOKBOOK_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database
    let db = lookbook_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner { db });

    // Routes
    let public_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/posts", post(posts::create_post))
        .route("/posts", get(posts::list_posts))
        .route(
            "/posts/{uid}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/looks", post(looks::create_look))
        .route("/looks", get(looks::list_looks))
        .route(
            "/looks/{uid}",
            get(looks::get_look)
                .put(looks::update_look)
                .delete(looks::delete_look),
        )
        .route("/items", post(items::create_item))
        .route("/items", get(items::list_items))
        .route(
            "/items/{uid}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/comments", post(comments::create_comment))
        .route("/comments", get(comments::list_comments))
        .route(
            "/comments/{uid}",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Lookbook server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
