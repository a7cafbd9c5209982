/// Source analysis domain: the offline vulnerability database model and
/// the reachability matching rules. Pure logic, no I/O.
pub mod domain;
pub mod policies;
pub mod services;
