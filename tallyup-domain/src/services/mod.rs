pub mod balance_engine;
pub mod settlement_planner;

pub use balance_engine::BalanceEngine;
pub use settlement_planner::SettlementPlanner;
