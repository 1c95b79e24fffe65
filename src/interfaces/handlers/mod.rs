pub mod analytics;
pub mod auth;
pub mod contact;
pub mod customers;
pub mod gallery;
pub mod json_error;
pub mod orders;
pub mod products;
pub mod stats;
pub mod system;
