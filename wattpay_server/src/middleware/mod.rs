mod cors;

pub use cors::{CorsMiddlewareFactory, CorsMiddlewareService, CORS_ALLOW_HEADERS, CORS_ALLOW_ORIGIN};
