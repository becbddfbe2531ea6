//! スプレッドシートストア
//!
//! コレクション（入力）・Card Details（追記先）・Search Results
//! （手動選択用の一時シート）の3シートを持つ表形式ストアのポート。
//! 実運用はローカルxlsxワークブック（`XlsxStore`）、テストでは
//! インメモリのスタブに差し替える。

pub mod writer;
pub mod xlsx;

use crate::catalog::CatalogCandidate;
use crate::error::Result;
use crate::reconciler::{CollectionRow, DetailRecord, RowStatus};
use thiserror::Error;

pub use writer::SheetWriter;
pub use xlsx::XlsxStore;

/// 書き込み系操作のエラー
#[derive(Error, Debug)]
pub enum WriteError {
    /// レート制限（HTTP 429相当）。ライターが規定回数までリトライする
    #[error("レート制限超過 (429)")]
    RateLimited,

    #[error("ストアエラー: {0}")]
    Store(String),
}

/// シートストアのポート
///
/// 行番号は1始まり（行1はヘッダ、データは行2から）。
pub trait SheetStore {
    /// コレクションシートの全データ行を読み込む
    fn collection_rows(&mut self) -> Result<Vec<CollectionRow>>;

    /// Card Detailsシートの (行番号, 一意ID) 一覧（価格更新パス用）
    fn detail_identifiers(&mut self) -> Result<Vec<(u32, String)>>;

    /// Card Detailsシートへレコードを追記する
    fn append_detail(&mut self, record: &DetailRecord) -> std::result::Result<(), WriteError>;

    /// ステータスを更新し、行のエラー注記をクリアする
    fn set_status(&mut self, row_index: u32, status: RowStatus)
        -> std::result::Result<(), WriteError>;

    /// 行にエラー注記を書き込む
    fn set_note(&mut self, row_index: u32, note: &str) -> std::result::Result<(), WriteError>;

    /// Card Detailsシートの価格セルを更新する
    fn set_price(&mut self, row_index: u32, price: f64) -> std::result::Result<(), WriteError>;

    /// Search Resultsシートを候補一覧で置き換える
    /// （書き込む件数は渡された候補数と常に一致させる）
    fn publish_search_results(
        &mut self,
        candidates: &[CatalogCandidate],
    ) -> std::result::Result<(), WriteError>;

    /// Search Resultsシートをヘッダのみに戻す
    fn clear_search_results(&mut self) -> std::result::Result<(), WriteError>;
}
