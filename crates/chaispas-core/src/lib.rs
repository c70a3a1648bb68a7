//! chaispas-core
//!
//! Core building blocks for chaispas: pick one option at random, keep a
//! bounded log of past decisions, and summarize it.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, choice, record, log, summary, errors）
//! - **ports**: 抽象化レイヤー（Clock, IdGenerator, IndexSource, LogStore）
//! - **engine**: 一様抽選（純粋関数）
//! - **analytics**: 集計・ランキング・export / import
//! - **app**: ワークフロー（DecisionSession, DecisionSubmission）
//! - **impls**: 実装（InMemoryLogStore, JsonFileLogStore）

pub mod analytics;
pub mod app;
pub mod domain;
pub mod engine;
pub mod impls;
pub mod ports;

pub use analytics::AnalyticsLimits;
pub use app::{DecisionSession, DecisionSubmission, PendingDecision, SessionBuilder};
pub use domain::{
    AnalyticsSummary, ChaispasError, Choice, ChoiceCount, ChoiceId, DecisionId, DecisionLog,
    DecisionRecord, ErrorKind,
};
pub use engine::decide;
