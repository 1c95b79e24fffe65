pub mod analytics;
pub mod blob;
pub mod contact_message;
pub mod fan_photo;
pub mod order;
pub mod product;
pub mod session;
pub mod storage;
pub mod user;
