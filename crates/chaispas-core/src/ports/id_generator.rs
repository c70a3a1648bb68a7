//! IdGenerator port - ID 生成の抽象化
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（本番用）

use crate::domain::ids::{ChoiceId, DecisionId};
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は Choice / Decision の ID を生成
///
/// # ULID の特性
/// - 時刻でソート可能
/// - 調整なしで生成可能（サーバー側採番にもそのまま使える）
pub trait IdGenerator: Send + Sync {
    fn choice_id(&self) -> ChoiceId;

    fn decision_id(&self) -> DecisionId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
/// テスト時は FixedClock で timestamp 部分を固定できます。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        // 1970 年以前の時計は 0 に丸める
        let timestamp_ms = u64::try_from(self.clock.now().timestamp_millis()).unwrap_or(0);
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn choice_id(&self) -> ChoiceId {
        ChoiceId::from_ulid(self.next_ulid())
    }

    fn decision_id(&self) -> DecisionId {
        DecisionId::from_ulid(self.next_ulid())
    }
}
