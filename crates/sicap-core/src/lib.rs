//! Core types and data structures for the SI-CAP curriculum workspace.
//!
//! This crate holds the domain model and everything the dashboard edits it
//! with: ordered entity stores, filtered views, relation matrices, and form
//! dialogs. It knows nothing about terminals or databases; the one persisted
//! preference goes through the [`settings::KeyValueStore`] trait.

pub mod draft;
pub mod entity;
pub mod error;
pub mod form;
pub mod kkm;
pub mod matrix;
pub mod options;
pub mod report;
pub mod route;
pub mod seed;
pub mod settings;
pub mod store;
pub mod view;
pub mod workspace;

pub use error::{Error, Result};
