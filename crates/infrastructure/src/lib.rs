//! Infrastructure adapters for Gridgate outbound ports.

#![forbid(unsafe_code)]

mod http_table_gateway;

pub use http_table_gateway::HttpTableGateway;
