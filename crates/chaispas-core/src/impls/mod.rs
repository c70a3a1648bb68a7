//! Impls - ポートの実装
//!
//! - InMemoryLogStore: 開発・テスト用
//! - JsonFileLogStore: CLI 用（ファイル 1 つにログ全体）

pub mod json_file;
pub mod memory;

pub use self::json_file::JsonFileLogStore;
pub use self::memory::InMemoryLogStore;
