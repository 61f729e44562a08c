pub mod catalog;
pub mod config;
pub mod contract;
pub mod diff;
pub mod index;
pub mod index_store;
pub mod logging;
pub mod model;
pub mod presentation;
pub mod runtime;
pub mod screen;
pub mod search;
pub mod transport;
