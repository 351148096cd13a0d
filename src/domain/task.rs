//! Task model — typed units of work submitted for routing.
//!
//! Each task names the agents eligible to receive it; the kind carries the
//! fields that kind requires, so dispatch is an exhaustive match instead of
//! string-tag comparison.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::BoulevardError;

/// Frameworks the build pipeline supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Vue,
    Flask,
    #[value(name = "fastapi")]
    FastApi,
}

impl Framework {
    pub const ALL: [Framework; 4] = [
        Framework::React,
        Framework::Vue,
        Framework::Flask,
        Framework::FastApi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
            Framework::Flask => "flask",
            Framework::FastApi => "fastapi",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = BoulevardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "react" => Ok(Framework::React),
            "vue" => Ok(Framework::Vue),
            "flask" => Ok(Framework::Flask),
            "fastapi" => Ok(Framework::FastApi),
            other => Err(BoulevardError::Validation(format!(
                "Unsupported framework: {other}"
            ))),
        }
    }
}

/// Trade direction for crypto execution tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an agent is asked to do, with the fields that kind requires.
///
/// Framework strings stay unvalidated here; the receiving agent checks them
/// against [`Framework`] so an unsupported value becomes an error result,
/// not a construction failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskKind {
    Build {
        framework: String,
        project_name: String,
    },
    LocalBuild {
        framework: String,
        project_name: String,
        #[serde(default)]
        project_path: Option<PathBuf>,
    },
    CreateProject {
        name: String,
        framework: String,
    },
    MonitorTrends,
    GenerateContent {
        #[serde(default = "default_content_type")]
        content_type: String,
        topic: String,
    },
    AnalyzeMarket {
        #[serde(default = "default_symbols")]
        symbols: Vec<String>,
        #[serde(default = "default_timeframe")]
        timeframe: String,
    },
    ExecuteTrade {
        symbol: String,
        action: TradeAction,
        amount: Decimal,
    },
    ScoutOpportunities {
        #[serde(default = "default_context")]
        context: String,
    },
}

fn default_content_type() -> String {
    "article".to_string()
}

fn default_symbols() -> Vec<String> {
    vec!["BTC".to_string(), "ETH".to_string()]
}

fn default_timeframe() -> String {
    "1h".to_string()
}

fn default_context() -> String {
    "general".to_string()
}

impl TaskKind {
    /// Stable tag for logging.
    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::Build { .. } => "build",
            TaskKind::LocalBuild { .. } => "local_build",
            TaskKind::CreateProject { .. } => "create_project",
            TaskKind::MonitorTrends => "monitor_trends",
            TaskKind::GenerateContent { .. } => "generate_content",
            TaskKind::AnalyzeMarket { .. } => "analyze_market",
            TaskKind::ExecuteTrade { .. } => "execute_trade",
            TaskKind::ScoutOpportunities { .. } => "scout_opportunities",
        }
    }
}

/// A unit of work plus the ordered list of agent ids eligible to receive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(flatten)]
    pub kind: TaskKind,
    #[serde(default)]
    pub target_agents: Vec<String>,
}

impl Task {
    pub fn new(kind: TaskKind, target_agents: Vec<String>) -> Self {
        Self {
            kind,
            target_agents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_parses_supported_set() {
        assert_eq!("react".parse::<Framework>().unwrap(), Framework::React);
        assert_eq!("fastapi".parse::<Framework>().unwrap(), Framework::FastApi);
        assert!("svelte".parse::<Framework>().is_err());
    }

    #[test]
    fn task_kind_round_trips_through_wire_tags() {
        let task = Task::new(
            TaskKind::LocalBuild {
                framework: "flask".to_string(),
                project_name: "demo".to_string(),
                project_path: None,
            },
            vec!["builder-1".to_string()],
        );
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["type"], "local_build");
        assert_eq!(json["target_agents"][0], "builder-1");
        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn generate_content_defaults_to_article() {
        let task: TaskKind =
            serde_json::from_str(r#"{"type":"generate_content","topic":"rust"}"#).unwrap();
        match task {
            TaskKind::GenerateContent { content_type, .. } => {
                assert_eq!(content_type, "article")
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
