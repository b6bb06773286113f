//! Progress reporting while a pipeline turn runs

pub mod reporter;
