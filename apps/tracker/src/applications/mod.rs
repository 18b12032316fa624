// Application records: validation, persistence and the /applications routes.

pub mod handlers;
pub mod postgres;
pub mod store;
pub mod validation;
