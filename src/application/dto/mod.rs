/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod analysis_request;
mod analysis_response;
mod build_database_request;
mod build_database_response;
mod invocation_strategy;

pub use analysis_request::AnalysisRequest;
pub use analysis_response::AnalysisResponse;
pub use build_database_request::BuildDatabaseRequest;
pub use build_database_response::BuildDatabaseResponse;
pub use invocation_strategy::InvocationStrategy;
