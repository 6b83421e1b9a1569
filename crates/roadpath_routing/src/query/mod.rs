pub mod query_coordinator;
pub mod selection;
