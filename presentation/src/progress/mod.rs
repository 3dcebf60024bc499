//! Wait indicators for backend requests

pub mod reporter;
