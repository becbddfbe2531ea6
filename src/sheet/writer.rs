//! リトライ付きシートライター
//!
//! ストアへの書き込みをラップし、レート制限（429）のときだけ
//! 固定間隔で規定回数までリトライする。それ以外のエラーは
//! 即座に呼び出し側へ伝播する。カタログ呼び出しのペーシングとは
//! 独立したリトライ予算を持つ。

use super::{SheetStore, WriteError};
use crate::catalog::CatalogCandidate;
use crate::error::Result;
use crate::reconciler::{DetailRecord, RowStatus};
use std::time::Duration;

/// リトライ上限（初回含む試行回数）
const RETRY_LIMIT: u32 = 5;
/// リトライ間隔
const RETRY_WAIT: Duration = Duration::from_secs(30);

pub struct SheetWriter<S: SheetStore> {
    store: S,
    retry_limit: u32,
    retry_wait: Duration,
}

impl<S: SheetStore> SheetWriter<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            retry_limit: RETRY_LIMIT,
            retry_wait: RETRY_WAIT,
        }
    }

    /// テスト用: リトライ間隔・回数を差し替える
    pub fn with_retry(store: S, retry_limit: u32, retry_wait: Duration) -> Self {
        Self {
            store,
            retry_limit,
            retry_wait,
        }
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn write_detail(&mut self, record: &DetailRecord) -> Result<()> {
        self.with_retry_loop(|store| store.append_detail(record))
    }

    /// ステータスを `fetched` に進め、エラー注記をクリアする
    pub fn advance_status(&mut self, row_index: u32) -> Result<()> {
        self.with_retry_loop(|store| store.set_status(row_index, RowStatus::Fetched))
    }

    pub fn annotate(&mut self, row_index: u32, note: &str) -> Result<()> {
        self.with_retry_loop(|store| store.set_note(row_index, note))
    }

    pub fn set_price(&mut self, row_index: u32, price: f64) -> Result<()> {
        self.with_retry_loop(|store| store.set_price(row_index, price))
    }

    pub fn publish_search_results(&mut self, candidates: &[CatalogCandidate]) -> Result<()> {
        self.with_retry_loop(|store| store.publish_search_results(candidates))
    }

    pub fn clear_search_results(&mut self) -> Result<()> {
        self.with_retry_loop(|store| store.clear_search_results())
    }

    fn with_retry_loop<F>(&mut self, mut op: F) -> Result<()>
    where
        F: FnMut(&mut S) -> std::result::Result<(), WriteError>,
    {
        let mut attempt = 1;
        loop {
            match op(&mut self.store) {
                Ok(()) => return Ok(()),
                Err(WriteError::RateLimited) if attempt < self.retry_limit => {
                    println!(
                        "⚠ レート制限超過。{}秒後にリトライします… (試行 {} / {})",
                        self.retry_wait.as_secs(),
                        attempt,
                        self.retry_limit
                    );
                    std::thread::sleep(self.retry_wait);
                    attempt += 1;
                }
                // 429以外、またはリトライ上限到達
                Err(e) => return Err(e.into()),
            }
        }
    }
}
