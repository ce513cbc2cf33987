pub mod api_client;
pub mod audio;
pub mod session_service;

pub use api_client::ApiClient;
