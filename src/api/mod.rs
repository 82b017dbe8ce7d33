pub mod client;
pub mod models;
pub mod signing;
pub mod websupport;

pub use client::DnsApiClient;
pub use websupport::WebsupportClient;
