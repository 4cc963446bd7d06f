//! HTTP layer: routes, handlers, DTOs and middleware.

mod doc;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
