pub mod portfolio;

pub use portfolio::{RecommendPortfolio, RiskLevel, UnknownRiskLevel};
