pub mod demo;
pub mod domain;
pub mod error;
pub mod model;
pub mod report;
pub mod stats;
pub mod style;
pub mod validate;
