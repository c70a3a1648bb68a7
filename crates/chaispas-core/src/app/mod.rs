//! App - アプリケーションロジック
//!
//! - **session**: 候補編集 → 抽選 → 記録 → 永続化 のワークフロー
//! - **submission**: ID なしで届く決定の検証とサーバー側採番

pub mod session;
pub mod submission;

pub use self::session::{DecisionSession, PendingDecision, SessionBuilder};
pub use self::submission::{DecisionSubmission, SubmittedChoice};
