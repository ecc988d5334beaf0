// src/codegen/mod.rs
//! Code-generation backends
//!
//! Backends consume the compiled AST read-only, either by matching variants
//! directly or through the generic child contract.

pub mod sql;
