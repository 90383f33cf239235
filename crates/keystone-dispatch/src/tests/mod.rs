//! Crate-level unit and behaviour tests.

mod support;
