//! # Routes
//!
//! ```text
//! /health                       health::check
//! /api/staff                    staff::list | staff::create
//! /api/staff/{id}               staff::get | staff::update | staff::remove
//! /api/pharmacy                 pharmacy::get | pharmacy::save
//! /api/stock                    stock::list | stock::create
//! /api/stock/{id}               stock::get | stock::update | stock::remove
//! /api/stock/{id}/adjust        stock::adjust
//! /api/bills                    bills::list | bills::create
//! /api/bills/{id}               bills::get
//! /api/reports/sales            reports::sales
//! /api/reports/stock            reports::stock
//! /api/session                  session::current | session::login | session::logout
//! /api/session/devices          session::devices
//! /ws                           realtime::ws_handler
//! ```

pub mod bills;
pub mod health;
pub mod pharmacy;
pub mod reports;
pub mod session;
pub mod staff;
pub mod stock;

use axum::http::Uri;
use axum::routing::{get, post};
use axum::Router;

use crate::error::{ApiError, ErrorCode};
use crate::realtime;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/staff", get(staff::list).post(staff::create))
        .route(
            "/staff/{id}",
            get(staff::get).put(staff::update).delete(staff::remove),
        )
        .route("/pharmacy", get(pharmacy::get).post(pharmacy::save))
        .route("/stock", get(stock::list).post(stock::create))
        .route(
            "/stock/{id}",
            get(stock::get).put(stock::update).delete(stock::remove),
        )
        .route("/stock/{id}/adjust", post(stock::adjust))
        .route("/bills", get(bills::list).post(bills::create))
        .route("/bills/{id}", get(bills::get))
        .route("/reports/sales", get(reports::sales))
        .route("/reports/stock", get(reports::stock))
        .route(
            "/session",
            get(session::current)
                .post(session::login)
                .delete(session::logout),
        )
        .route("/session/devices", get(session::devices));

    Router::new()
        .route("/health", get(health::check))
        .route("/ws", get(realtime::ws_handler))
        .nest("/api", api)
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::new(ErrorCode::NotFound, format!("No route for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Serves the full router on a free port and returns the raw response.
    async fn raw_get(path: &str) -> String {
        let app = build_router(test_state().await);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .ok();
        });

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request =
            format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();
        raw
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_not_found() {
        let raw = raw_get("/api/nope").await;
        let (head, body) = raw.split_once("\r\n\r\n").unwrap();

        assert!(head.starts_with("HTTP/1.1 404"), "{head}");
        assert!(head.to_ascii_lowercase().contains("content-type: application/json"));

        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "No route for /api/nope");
    }

    #[tokio::test]
    async fn test_known_route_is_served() {
        let raw = raw_get("/api/session/devices").await;
        let (head, body) = raw.split_once("\r\n\r\n").unwrap();

        assert!(head.starts_with("HTTP/1.1 200"), "{head}");
        assert_eq!(body, "[]");
    }
}
