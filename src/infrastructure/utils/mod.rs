pub mod data_url;
pub mod get_client_ip;
pub mod sanitize;
