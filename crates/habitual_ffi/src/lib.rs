//! Flutter bridge for the Habitual core.

pub mod api;
