//! 行照合エンジン
//!
//! コレクション行とカタログ候補リストから、書き込むレコードを1件に
//! 確定するか、手動選択（曖昧）か、該当なしかを判定する。
//!
//! 照合ポリシー（優先順）:
//! 1. 一意IDが設定済みなら完全一致のみ。不一致なら該当なし
//!    （名前/番号へのフォールバックはしない）
//! 2. 名前のみの広域検索の結果は件数に関わらず手動選択へ
//! 3. ID/番号スコープの検索で候補が1件ならそれを採用
//! 4. 複数候補は正規化済み番号の文字列比較で絞り込み、
//!    1件に絞れなければ全候補を手動選択へ（勝手に選ばない）

pub mod number;
pub mod types;

use crate::catalog::{CardFilter, CatalogCandidate};
use chrono::Local;
use number::numbers_match;
pub use types::{CollectionRow, DetailRecord, RowStatus};

/// 照合結果
#[derive(Debug, Clone)]
pub enum Outcome {
    /// 1件に確定。レコードを書き込みステータスを進める
    Matched(DetailRecord),
    /// 手動選択が必要。候補は検索元のリストをそのまま全件保持する
    Ambiguous(Vec<CatalogCandidate>),
    /// 該当なし。行は現状のまま残す
    NotFound,
}

pub fn reconcile(
    row: &CollectionRow,
    filter: &CardFilter,
    candidates: &[CatalogCandidate],
) -> Outcome {
    if candidates.is_empty() {
        return Outcome::NotFound;
    }

    // 一意IDは名前/番号より常に優先
    if !row.unique_identifier.is_empty() {
        return match candidates
            .iter()
            .find(|c| c.identifier == row.unique_identifier)
        {
            Some(candidate) => Outcome::Matched(derive_record(row, candidate)),
            None => Outcome::NotFound,
        };
    }

    // 広域検索の結果はオペレータが確定する
    if filter.is_broad() {
        return Outcome::Ambiguous(candidates.to_vec());
    }

    if candidates.len() == 1 {
        return Outcome::Matched(derive_record(row, &candidates[0]));
    }

    // 再版等で複数返った場合は番号で絞る
    let narrowed: Vec<&CatalogCandidate> = candidates
        .iter()
        .filter(|c| numbers_match(&c.number, &row.card_number))
        .collect();

    if narrowed.len() == 1 {
        Outcome::Matched(derive_record(row, narrowed[0]))
    } else {
        Outcome::Ambiguous(candidates.to_vec())
    }
}

/// 確定した候補から書き込みレコードを導出する
///
/// カード名はカタログ側の正規表記を採用。日付は照合実行時のローカル日付。
pub fn derive_record(row: &CollectionRow, candidate: &CatalogCandidate) -> DetailRecord {
    DetailRecord {
        identifier: candidate.identifier.clone(),
        card_name: candidate.name.clone(),
        set_name: candidate.set_name.clone(),
        number: candidate.number.clone(),
        rarity: candidate.rarity.clone(),
        primary_type: candidate.types.first().cloned().unwrap_or_default(),
        primary_subtype: candidate.subtypes.first().cloned().unwrap_or_default(),
        price: candidate.best_price(),
        image_url: candidate.image_url.clone(),
        date_added: Local::now().format("%Y-%m-%d").to_string(),
        condition: row.condition.clone(),
        location: row.location.clone(),
        marketplace_url: candidate.marketplace_url.clone(),
    }
}
