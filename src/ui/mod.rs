//! Display-ready view models derived from roster state.

pub mod viewmodel;

pub use viewmodel::{student_viewmodel, RosterViewModel, StudentRow, MISSING};
