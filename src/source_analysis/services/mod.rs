mod reachability_matcher;
mod vulnerability_collector;

pub use reachability_matcher::{MatchSummary, ReachabilityMatcher};
pub use vulnerability_collector::VulnerabilityCollector;
