pub mod auth;
pub mod cart;
pub mod middleware;
pub mod products;
pub mod profiles;
pub mod rest;
pub mod state;

// Re-export the pieces the binaries need to build the web server.
pub use middleware::require_auth;
pub use rest::{build_router, ApiDoc};
pub use state::{AppState, CurrentUser};
