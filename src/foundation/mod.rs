//! Foundation types shared across the resolver.

pub mod key;

pub use key::TypeKey;
