//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」。
//! 乱数・時計・ID 採番・永続化をすべて trait 越しに注入し、
//! コア（engine / analytics）はどの実装にも依存しない。

pub mod clock;
pub mod id_generator;
pub mod index_source;
pub mod log_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::index_source::{IndexSource, ScriptedIndex, SeededIndex, ThreadRngIndex};
pub use self::log_store::{LogStore, StoreError};
