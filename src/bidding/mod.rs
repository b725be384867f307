pub mod adslot;
pub mod auth;
pub mod country;
pub mod device;
pub mod endpoint;
pub mod engine;
pub mod exchange_client;
