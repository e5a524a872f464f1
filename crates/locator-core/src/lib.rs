//! Core types for relationship-path object location.
//!
//! Provides the kind and object model ([`kind`], [`object`]), label selectors,
//! edge declarations and compiled traversal steps ([`edge`]), the locator
//! document ([`locator`]), the collaborator traits the resolver is written
//! against ([`access`]), and the shared error taxonomy ([`error`]).

pub mod access;
pub mod config;
pub mod edge;
pub mod error;
pub mod kind;
pub mod locator;
pub mod object;
pub mod schema;
pub mod selector;
