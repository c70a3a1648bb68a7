//! Errors - エラー型と分類
//!
//! すべてのエラーは呼び出し側で回復可能（プロセスを落とさない）。

use thiserror::Error;

use crate::ports::StoreError;

/// ErrorKind はエラーの運用分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 空の候補集合を decide に渡した（呼び出し側のバグ）
    InvalidInput,
    /// 候補不足・空文字など、ユーザーに再入力を促すもの
    Validation,
    /// import / 永続化データの破損
    Parse,
    /// 永続化先に到達できない
    StorageUnavailable,
    /// selectedChoice が choices に含まれない
    Integrity,
}

#[derive(Debug, Error)]
pub enum ChaispasError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("decision log codec error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] StoreError),

    #[error("integrity violation: {0}")]
    Integrity(String),
}

impl ChaispasError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Parse(_) => ErrorKind::Parse,
            Self::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            Self::Integrity(_) => ErrorKind::Integrity,
        }
    }

    /// 同じ操作をやり直す意味があるか（入力し直し / ストレージ復旧待ち）
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Validation | ErrorKind::StorageUnavailable
        )
    }
}

impl From<StoreError> for ChaispasError {
    fn from(error: StoreError) -> Self {
        match error {
            // 壊れた永続化データは import 失敗と同じ扱い
            StoreError::Corrupted(source) => Self::Parse(source),
            other => Self::StorageUnavailable(other),
        }
    }
}
