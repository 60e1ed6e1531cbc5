//! Example application served behind the directory middleware.
//!
//! ```text
//! /greet/hello       → "Hello, world!"
//! /greet/goodbye     → "Goodbye, world!"
//! /random            → 24 random lowercase letters
//! /static/{*path}    → built-in assets (hidden from listings)
//! ```

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use rand::Rng;

use crate::http::routes::Routes;

const RANDOM_LEN: usize = 24;

/// Built-in static assets: (path, content type, body).
const ASSETS: &[(&str, &str, &str)] = &[
    ("robots.txt", "text/plain; charset=utf-8", "User-agent: *\nDisallow:\n"),
    ("site.css", "text/css; charset=utf-8", "body { font-family: sans-serif; }\n"),
];

/// Routes of the example application.
pub fn demo_routes() -> Routes {
    Routes::new()
        .route("/greet/hello", get(hello))
        .route("/greet/goodbye", get(goodbye))
        .route("/random", get(random))
        .route("/static/{*path}", get(static_asset))
}

async fn hello() -> &'static str {
    "Hello, world!\n"
}

async fn goodbye() -> &'static str {
    "Goodbye, world!\n"
}

async fn random() -> String {
    random_token(RANDOM_LEN)
}

fn random_token(len: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut token: String = (0..len)
        .map(|_| rng.gen_range(b'a'..=b'z') as char)
        .collect();
    token.push('\n');
    token
}

async fn static_asset(Path(path): Path<String>) -> Response {
    match ASSETS.iter().find(|(name, _, _)| *name == path) {
        Some((_, content_type, body)) => {
            ([(header::CONTENT_TYPE, *content_type)], *body).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_token_shape() {
        let token = random_token(RANDOM_LEN);
        assert_eq!(token.len(), RANDOM_LEN + 1);
        assert!(token.ends_with('\n'));
        assert!(token.trim_end().chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_demo_routes_registered() {
        let routes = demo_routes();
        assert_eq!(routes.registry().len(), 4);
    }
}
