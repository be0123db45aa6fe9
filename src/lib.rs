pub mod analyzers;
pub mod config;
pub mod districts;
pub mod fetch;
pub mod filter;
pub mod loader;
pub mod output;
pub mod record;
pub mod table;
