pub mod analytics;
pub mod contact_message;
pub mod fan_photo;
pub mod order;
pub mod product;
pub mod session;
pub mod stats;
pub mod token;
pub mod user;
