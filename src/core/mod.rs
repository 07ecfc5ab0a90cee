pub mod broker;
pub mod db;
pub mod error;
pub mod kv;
pub mod schemas;
pub mod time;
pub mod workspace;
