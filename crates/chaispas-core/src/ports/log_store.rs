//! LogStore port - 決定ログの永続化先
//!
//! ブラウザストレージでも DB でも、load / store さえできれば同じ集計ロジックが動く。
//!
//! # 実装
//! - **InMemoryLogStore**: 開発・テスト用
//! - **JsonFileLogStore**: JSON ファイル 1 つにログ全体を保存

use thiserror::Error;

use crate::domain::DecisionRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// 保存済みデータが決定ログとして読めない
    #[error("stored decision log is corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),

    #[error("{0}")]
    Unavailable(String),
}

/// LogStore はログ全体を読み書きする
///
/// # 設計原則
/// - `load` は何も保存されていなければ空の Vec を返す
/// - `store` はログ全体の置き換え（部分更新はしない）
/// - 1 つのログに対して書き手は 1 人（排他制御は呼び出し側の責務）
pub trait LogStore {
    fn load(&self) -> Result<Vec<DecisionRecord>, StoreError>;

    fn store(&mut self, records: &[DecisionRecord]) -> Result<(), StoreError>;
}
