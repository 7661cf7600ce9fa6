//! Domain logic. Currently a single bounded context: the lookup tools.

pub mod tools;
