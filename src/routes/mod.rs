pub mod route_routes;

pub use route_routes::create_route_router;
