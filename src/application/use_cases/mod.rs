/// Use cases module containing application business logic orchestration
mod analyze_reachability;
mod build_database;

pub use analyze_reachability::AnalyzeReachabilityUseCase;
pub use build_database::BuildDatabaseUseCase;
