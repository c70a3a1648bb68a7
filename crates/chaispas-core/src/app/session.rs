//! DecisionSession - 1 ユーザー分のワークフロー
//!
//! 候補の編集 → decide → ログへの追記 → 永続化、をまとめる。
//! コア（engine / analytics）は純粋関数なので、状態を持つのはここだけ。
//!
//! # 単一ライター
//! セッションは 1 つのログに対する唯一の書き手という前提。
//! サーバーに組み込む場合、ユーザー単位で書き込みを直列化するのは呼び出し側の責務。

use std::time::{Duration, Instant};

use crate::analytics::{self, AnalyticsLimits, codec};
use crate::app::submission::DecisionSubmission;
use crate::domain::{
    AnalyticsSummary, ChaispasError, Choice, ChoiceId, ChoiceSet, DecisionLog, DecisionRecord,
    MIN_CHOICES,
};
use crate::engine;
use crate::ports::{
    Clock, IdGenerator, IndexSource, LogStore, SystemClock, ThreadRngIndex, UlidGenerator,
};

/// 候補に振る number タグの範囲（1..=1000）
const TAG_RANGE: usize = 1000;

/// SessionBuilder はポートを差し替えて DecisionSession を組み立てる
///
/// # 使用例
/// ```ignore
/// let session = SessionBuilder::new(JsonFileLogStore::new(path))
///     .limits(config.analytics)
///     .open();
/// ```
///
/// 指定しなかったポートは本番用（ThreadRngIndex / SystemClock / UlidGenerator）になる。
pub struct SessionBuilder<S> {
    store: S,
    index: Box<dyn IndexSource>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    limits: AnalyticsLimits,
}

impl<S: LogStore> SessionBuilder<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            index: Box::new(ThreadRngIndex),
            clock: Box::new(SystemClock),
            ids: Box::new(UlidGenerator::new(SystemClock)),
            limits: AnalyticsLimits::default(),
        }
    }

    pub fn index_source(mut self, index: impl IndexSource + 'static) -> Self {
        self.index = Box::new(index);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn limits(mut self, limits: AnalyticsLimits) -> Self {
        self.limits = limits;
        self
    }

    /// ログを読み込んでセッションを開く
    ///
    /// 読み込みに失敗しても（到達不能・破損）セッションは空のログで開き、
    /// 失敗内容は [`DecisionSession::load_error`] で参照できる。
    pub fn open(self) -> DecisionSession<S> {
        let mut log = DecisionLog::with_retention(self.limits.retention);

        let loaded = self
            .store
            .load()
            .map_err(ChaispasError::from)
            .and_then(|records| {
                codec::validate_records(&records)?;
                Ok(records)
            });

        let load_error = match loaded {
            Ok(records) => {
                let dropped = log.replace(records);
                if !dropped.is_empty() {
                    tracing::info!(dropped = dropped.len(), "stored log exceeded retention");
                }
                tracing::debug!(records = log.len(), "decision log loaded");
                None
            }
            Err(error) => {
                tracing::warn!(%error, "could not load decision log, starting empty");
                Some(error)
            }
        };

        DecisionSession {
            store: self.store,
            log,
            candidates: ChoiceSet::new(),
            index: self.index,
            clock: self.clock,
            ids: self.ids,
            limits: self.limits,
            load_error,
        }
    }
}

/// 抽選済み・未公開の決定
///
/// `begin` で抽選し、演出（待ち時間）の後に `reveal` で記録する。
/// 計測は begin 直前から reveal までのモノトニック時間。
#[derive(Debug)]
pub struct PendingDecision {
    started: Instant,
    choices: Vec<Choice>,
    winner: Choice,
}

impl PendingDecision {
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn candidates(&self) -> &[Choice] {
        &self.choices
    }
}

pub struct DecisionSession<S> {
    store: S,
    log: DecisionLog,
    candidates: ChoiceSet,
    index: Box<dyn IndexSource>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    limits: AnalyticsLimits,
    load_error: Option<ChaispasError>,
}

impl<S: LogStore> DecisionSession<S> {
    pub fn builder(store: S) -> SessionBuilder<S> {
        SessionBuilder::new(store)
    }

    // ========================================
    // 候補の編集
    // ========================================

    /// 候補を追加する。前後の空白は除去され、空文字は Validation エラー。
    pub fn add_choice(&mut self, text: &str) -> Result<&Choice, ChaispasError> {
        let number = self.index.next_index(TAG_RANGE) as i64 + 1;
        let choice = Choice::new(self.ids.choice_id(), text, number)?;
        Ok(self.candidates.push(choice))
    }

    pub fn remove_choice(&mut self, id: &ChoiceId) -> bool {
        self.candidates.remove(id)
    }

    /// 候補を空にする（ログには触らない）
    pub fn reset(&mut self) {
        self.candidates.reset();
    }

    pub fn candidates(&self) -> &[Choice] {
        self.candidates.as_slice()
    }

    // ========================================
    // 決定
    // ========================================

    /// 抽選だけ行う。候補が MIN_CHOICES 未満なら Validation エラー。
    pub fn begin(&mut self) -> Result<PendingDecision, ChaispasError> {
        let started = Instant::now();
        let choices = self.candidates.as_slice();
        if choices.len() < MIN_CHOICES {
            return Err(ChaispasError::Validation(format!(
                "add at least {MIN_CHOICES} choices before deciding ({} so far)",
                choices.len()
            )));
        }

        let winner = engine::decide(choices, &mut *self.index)?.clone();
        Ok(PendingDecision {
            started,
            choices: choices.to_vec(),
            winner,
        })
    }

    /// 公開して記録する
    ///
    /// 永続化に失敗した場合は StorageUnavailable を返すが、
    /// 記録はメモリ上のログに残る（`log().latest()` で取得できる）。
    pub fn reveal(&mut self, pending: PendingDecision) -> Result<DecisionRecord, ChaispasError> {
        let decision_time = u64::try_from(pending.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let record = DecisionRecord::new(
            self.ids.decision_id(),
            self.clock.now(),
            pending.choices,
            pending.winner,
            decision_time,
        )?;

        let evicted = self.log.append(record.clone());
        if !evicted.is_empty() {
            tracing::debug!(evicted = evicted.len(), "retention cap reached, dropped oldest");
        }
        tracing::info!(
            decision = %record.id,
            winner = %record.selected_choice.text,
            decision_time,
            "decision recorded"
        );

        self.persist()?;
        Ok(record)
    }

    /// 待ち時間なしで begin + reveal
    pub fn decide(&mut self) -> Result<DecisionRecord, ChaispasError> {
        let pending = self.begin()?;
        self.reveal(pending)
    }

    /// サーバー経由の決定を記録する
    ///
    /// 検証 → 追記 → 永続化 を 1 単位として扱い、どこかで失敗したらログを元に戻す。
    pub fn submit(
        &mut self,
        submission: DecisionSubmission,
    ) -> Result<DecisionRecord, ChaispasError> {
        let record = submission.resolve(&*self.ids, &*self.clock)?;

        let snapshot = self.log.clone();
        self.log.append(record.clone());
        if let Err(error) = self.persist() {
            self.log = snapshot;
            return Err(error);
        }

        tracing::info!(decision = %record.id, "submitted decision committed");
        Ok(record)
    }

    // ========================================
    // ログと集計
    // ========================================

    pub fn log(&self) -> &DecisionLog {
        &self.log
    }

    pub fn summary(&self) -> AnalyticsSummary {
        analytics::summarize_with(&self.log, &self.limits)
    }

    /// 直近 `limits.timeline` 件、新しい順
    pub fn timeline(&self) -> Vec<&DecisionRecord> {
        analytics::timeline(&self.log, self.limits.timeline)
    }

    pub fn export(&self) -> Result<String, ChaispasError> {
        analytics::export(&self.log)
    }

    /// ログを丸ごと置き換える
    ///
    /// パース・検証・永続化のどれかに失敗したら既存のログはそのまま。
    pub fn import(&mut self, text: &str) -> Result<usize, ChaispasError> {
        let snapshot = self.log.clone();
        let kept = codec::import_into(&mut self.log, text).inspect_err(|error| {
            tracing::warn!(%error, "import rejected, keeping existing log");
        })?;
        if let Err(error) = self.persist() {
            self.log = snapshot;
            return Err(error);
        }
        tracing::info!(records = kept, "decision log imported");
        Ok(kept)
    }

    /// 永続化に失敗したらログは消さない
    pub fn clear(&mut self) -> Result<(), ChaispasError> {
        let snapshot = self.log.clone();
        self.log.clear();
        if let Err(error) = self.persist() {
            self.log = snapshot;
            return Err(error);
        }
        tracing::info!("decision log cleared");
        Ok(())
    }

    /// open 時の読み込みエラー（あれば）
    pub fn load_error(&self) -> Option<&ChaispasError> {
        self.load_error.as_ref()
    }

    pub fn limits(&self) -> &AnalyticsLimits {
        &self.limits
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn persist(&mut self) -> Result<(), ChaispasError> {
        self.store.store(self.log.records()).map_err(|error| {
            tracing::warn!(%error, "failed to persist decision log");
            ChaispasError::from(error)
        })
    }
}
