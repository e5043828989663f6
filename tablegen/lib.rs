//! Generates typed C++ table access modules from a SQLite schema.
//!
//! The schema text is loaded into an in-memory SQLite catalog, each table is
//! turned into a [`TableModel`], and the emitters render that model into
//! artifacts handed to a [`Sink`].

pub mod catalog;
pub mod config;
pub mod dump;
pub mod emit;
mod error;
pub mod generator;
pub mod literal;
pub mod model;
pub mod patch;
pub mod registry;
pub mod sink;
pub mod statement;

pub use config::Config;
pub use emit::{Artifact, HeaderTemplate};
pub use error::Error;
pub use generator::{Generator, OutputKinds};
pub use model::TableModel;
pub use sink::{DirSink, MemorySink, Sink};

pub type Result<T, E = Error> = std::result::Result<T, E>;
