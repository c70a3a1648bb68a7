//! IndexSource port - 乱数の抽象化
//!
//! decide は `next_index(n)` を 1 回呼ぶだけ。
//! 各呼び出しは独立（前回の結果を覚えていない）であることが前提。
//!
//! # 実装
//! - **ThreadRngIndex**: `rand::thread_rng()`（本番用）
//! - **SeededIndex**: シード固定の `StdRng`（再現可能な統計テスト用）
//! - **ScriptedIndex**: 決まった列を返す（index → choice の対応を確認するテスト用）

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// IndexSource は `[0, n)` の一様な整数を返す
///
/// 呼び出し側は `n > 0` を保証する。
pub trait IndexSource {
    fn next_index(&mut self, n: usize) -> usize;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngIndex;

impl IndexSource for ThreadRngIndex {
    fn next_index(&mut self, n: usize) -> usize {
        rand::thread_rng().gen_range(0..n)
    }
}

#[derive(Debug, Clone)]
pub struct SeededIndex {
    rng: StdRng,
}

impl SeededIndex {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl IndexSource for SeededIndex {
    fn next_index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }
}

/// 決まった index 列を順に返す。列を使い切ったら先頭に戻る。
///
/// 値はそのまま返す（`n` で丸めない）ので、範囲外を返す壊れた乱数源の再現にも使える。
#[derive(Debug, Clone)]
pub struct ScriptedIndex {
    script: VecDeque<usize>,
}

impl ScriptedIndex {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl IndexSource for ScriptedIndex {
    fn next_index(&mut self, _n: usize) -> usize {
        match self.script.pop_front() {
            Some(i) => {
                self.script.push_back(i);
                i
            }
            None => 0,
        }
    }
}
