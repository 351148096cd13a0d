//! Crypto trading agent — market analysis and trade execution tracking.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;

use crate::domain::{Task, TaskKind, TaskResult, TradeAction};
use crate::error::Result;

use super::core::AgentCore;
use super::traits::Agent;

pub struct CryptoTradingAgent {
    core: AgentCore,
}

impl CryptoTradingAgent {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            core: AgentCore::new(id, &["crypto_trading", "market_analysis"]),
        }
    }

    async fn analyze_market(&self, symbols: &[String], timeframe: &str) -> Result<TaskResult> {
        info!(agent = %self.id(), ?symbols, timeframe, "analyzing market");
        let connectors = self.core.connectors().await;

        let market_prediction = connectors
            .abacus_predict(json!({
                "market": "crypto",
                "symbols": symbols,
                "timeframe": timeframe,
            }))
            .await
            .into_value("abacus");

        let _ = connectors
            .taskade_create_task(json!({
                "title": format!("Crypto Analysis: {}", Utc::now().format("%Y-%m-%d %H:%M")),
                "description": format!("Market analysis for {symbols:?}"),
                "status": "in_progress",
            }))
            .await
            .into_value("taskade");

        Ok(TaskResult::success()
            .with(
                "market_prediction",
                market_prediction.unwrap_or_else(|| json!({})),
            )
            .with_timestamp())
    }

    /// Validate via CrewAI, then record via Taskade. The two calls are
    /// independent: a failure after the first is not rolled back.
    async fn execute_trade(
        &self,
        symbol: &str,
        action: TradeAction,
        amount: Decimal,
    ) -> Result<TaskResult> {
        info!(agent = %self.id(), symbol, %action, %amount, "executing trade");
        let connectors = self.core.connectors().await;

        let validation = connectors
            .crewai_create_agent(json!({
                "task": format!("Validate {action} trade for {symbol}"),
                "role": "trade_validator",
                "goal": "Ensure trade safety and compliance",
            }))
            .await
            .into_value("crewai");

        let _ = connectors
            .taskade_create_task(json!({
                "title": format!("Crypto Trade: {symbol} {action}"),
                "description": format!(
                    "{} {amount} {symbol}",
                    action.as_str().to_uppercase()
                ),
                "status": "pending",
            }))
            .await
            .into_value("taskade");

        Ok(TaskResult::success()
            .with(
                "trade_details",
                json!({
                    "symbol": symbol,
                    "action": action,
                    "amount": amount,
                    "validation": validation.unwrap_or_else(|| json!({})),
                }),
            )
            .with_timestamp())
    }
}

#[async_trait]
impl Agent for CryptoTradingAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    async fn process_task(&self, task: Task) -> Result<TaskResult> {
        match task.kind {
            TaskKind::AnalyzeMarket {
                symbols,
                timeframe,
            } => self.analyze_market(&symbols, &timeframe).await,
            TaskKind::ExecuteTrade {
                symbol,
                action,
                amount,
            } => self.execute_trade(&symbol, action, amount).await,
            _ => Ok(TaskResult::error("Unsupported task type")),
        }
    }
}
