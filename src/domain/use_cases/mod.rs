pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod contact;
pub mod customers;
pub mod extractors;
pub mod gallery;
pub mod orders;
pub mod stats;
