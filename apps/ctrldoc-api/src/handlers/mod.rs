//! Handlers 模块

pub mod channels;
pub mod controllers;
pub mod dashboard;
pub mod exports;
pub mod fixtures;
pub mod health;
pub mod locations;
pub mod metrics;
pub mod templates;

pub use channels::*;
pub use controllers::*;
pub use dashboard::*;
pub use exports::*;
pub use fixtures::*;
pub use health::*;
pub use locations::*;
pub use metrics::*;
pub use templates::*;
