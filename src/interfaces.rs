pub mod handlers;
pub mod providers;
pub mod routes;
