pub mod client_error;
pub mod route_service_client;
pub mod wire;
