//! Engine: the set of decision loops behind one control surface.

use std::sync::Arc;

use crate::application::analytics::recorder::AnalyticsRecorder;
use crate::application::risk::manager::RiskManager;
use crate::domain::stats::{CorrelationEntry, PerformanceMetrics};
use crate::port::inbound::engine::{EngineControl, LoopStatus};

use super::decision_loop::DecisionLoop;

/// Owns every configured decision loop and the shared analytics.
pub struct Engine {
    loops: Vec<Arc<DecisionLoop>>,
    analytics: Arc<AnalyticsRecorder>,
    /// Distinct risk managers across loops.
    portfolios: Vec<Arc<RiskManager>>,
}

impl Engine {
    #[must_use]
    pub fn new(loops: Vec<Arc<DecisionLoop>>, analytics: Arc<AnalyticsRecorder>) -> Self {
        let mut portfolios: Vec<Arc<RiskManager>> = Vec::new();
        for decision_loop in &loops {
            let risk = decision_loop.risk();
            if !portfolios.iter().any(|p| Arc::ptr_eq(p, risk)) {
                portfolios.push(Arc::clone(risk));
            }
        }
        Self {
            loops,
            analytics,
            portfolios,
        }
    }

    #[must_use]
    pub fn loops(&self) -> &[Arc<DecisionLoop>] {
        &self.loops
    }

    #[must_use]
    pub fn analytics(&self) -> &Arc<AnalyticsRecorder> {
        &self.analytics
    }

    /// Number of independent portfolios (1 when loops share one).
    #[must_use]
    pub fn portfolio_count(&self) -> usize {
        self.portfolios.len()
    }

    /// Wait for every loop task to exit.
    pub async fn join(&self) {
        for decision_loop in &self.loops {
            decision_loop.join().await;
        }
    }
}

impl EngineControl for Engine {
    fn start(&self) -> usize {
        self.loops.iter().filter(|l| l.start()).count()
    }

    fn stop(&self) {
        for decision_loop in &self.loops {
            decision_loop.stop();
        }
    }

    fn dashboard(&self) -> String {
        self.analytics.dashboard()
    }

    fn correlation_map(&self) -> String {
        self.analytics.render_correlation_map()
    }

    fn correlations(&self) -> Vec<CorrelationEntry> {
        self.analytics.correlation_map()
    }

    fn performance(&self) -> PerformanceMetrics {
        self.analytics.performance()
    }

    fn status(&self) -> Vec<LoopStatus> {
        self.loops
            .iter()
            .map(|l| LoopStatus {
                mode: l.mode(),
                running: l.is_running(),
                risk_state: l.risk().risk_state(),
                portfolio: l.risk().get_status(),
            })
            .collect()
    }

    fn resume_trading(&self) {
        for risk in &self.portfolios {
            risk.resume_trading();
        }
    }
}
