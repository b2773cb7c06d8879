pub mod image_store;
pub mod logger;
pub mod session;
