//! Domain identifiers (strongly-typed IDs).
//!
//! # 文字列ベースの ID + Phantom Type
//! 新しく採番する ID は ULID にプレフィックスを付けたもの（例: `choice-01J...`）。
//! ただし import されたログやサーバー側で採番された ID は任意の文字列なので、
//! 中身は `String` のまま保持し、シリアライズ時もそのまま書き戻します。
//!
//! `Id<T>` の `T` は実行時には使わないマーカー型で、
//! ChoiceId と DecisionId を取り違えるとコンパイルエラーになります。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
pub trait IdMarker: Send + Sync + 'static {
    /// 新規採番時のプレフィックス（例: "choice-", "decision-"）
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// # 例
/// ```ignore
/// let choice_id: ChoiceId = Id::from_ulid(Ulid::new());
/// let decision_id: DecisionId = Id::from_ulid(Ulid::new());
/// // choice_id と decision_id は異なる型なので、混同できない
/// ```
pub struct Id<T: IdMarker> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    /// ULID から新しい Id を作成（プレフィックス付き）
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self::from_raw(format!("{}{}", T::prefix(), ulid))
    }

    /// 既存の文字列をそのまま Id として扱う（import / サーバー採番用）
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

// derive だと T にも Clone/PartialEq などを要求してしまうので手で実装する

impl<T: IdMarker> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::from_raw(self.value.clone())
    }
}

impl<T: IdMarker> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: IdMarker> Eq for Id<T> {}

impl<T: IdMarker> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: IdMarker> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T: IdMarker> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from_raw)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Choice のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceMark {}

impl IdMarker for ChoiceMark {
    fn prefix() -> &'static str {
        "choice-"
    }
}

/// Decision のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionMark {}

impl IdMarker for DecisionMark {
    fn prefix() -> &'static str {
        "decision-"
    }
}

/// Identifier of a Choice (one candidate in a candidate set).
pub type ChoiceId = Id<ChoiceMark>;

/// Identifier of a DecisionRecord.
pub type DecisionId = Id<DecisionMark>;
