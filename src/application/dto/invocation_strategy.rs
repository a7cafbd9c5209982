use serde::Deserialize;

/// How the reachability analyzer is invoked
///
/// Selected per call through `AnalysisRequest`, never through process-wide
/// state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvocationStrategy {
    /// Direct process invocation, buffered output in the legacy single
    /// document format
    Legacy,
    /// Streaming command invocation, message stream decoded as it arrives
    #[default]
    Streaming,
}

impl std::str::FromStr for InvocationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(InvocationStrategy::Legacy),
            "streaming" | "stream" => Ok(InvocationStrategy::Streaming),
            _ => Err(format!(
                "Invalid invocation strategy: {}. Please specify 'legacy' or 'streaming'",
                s
            )),
        }
    }
}

impl std::fmt::Display for InvocationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvocationStrategy::Legacy => write!(f, "legacy"),
            InvocationStrategy::Streaming => write!(f, "streaming"),
        }
    }
}
