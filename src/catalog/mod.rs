//! カタログAPIクライアント
//!
//! 構造化フィルタ（ID / 名前+番号 / 名前のみ）でリモートカタログを
//! 検索し、候補カードのリストを返す。ネットワークエラー・非200応答・
//! 空の結果はすべて「候補なし」として扱い、呼び出し側へはエラーを
//! 伝播しない（ソフトフェイル）。

pub mod types;

use crate::config::Config;
use crate::error::Result;
use crate::reconciler::number::normalize_number;
use crate::reconciler::CollectionRow;
use std::time::Duration;
pub use types::{ApiCard, CatalogCandidate};

/// カタログ検索フィルタ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardFilter {
    /// カタログの一意IDで検索（最優先）
    Id(String),
    /// 名前+番号で絞り込み検索
    NameNumber { name: String, number: String },
    /// 名前のみの広域検索（曖昧検索用）
    Name(String),
}

impl CardFilter {
    /// 行の内容からフィルタを導出する
    ///
    /// - 一意IDがあれば常にID検索
    /// - `search` ステータスの行は名前のみの広域検索
    /// - それ以外は番号があれば名前+番号、なければ名前のみ
    pub fn for_row(row: &CollectionRow) -> Self {
        use crate::reconciler::RowStatus;

        if !row.unique_identifier.is_empty() {
            return CardFilter::Id(row.unique_identifier.clone());
        }

        if row.status == RowStatus::Search || row.card_number.is_empty() {
            return CardFilter::Name(row.card_name.clone());
        }

        CardFilter::NameNumber {
            name: row.card_name.clone(),
            // カタログ側はゼロ埋めなしのため正規化してから問い合わせる
            number: normalize_number(&row.card_number),
        }
    }

    /// `q=` パラメータ用のクエリ式（ID検索はパスで指定するため対象外）
    pub fn query_expression(&self) -> Option<String> {
        match self {
            CardFilter::Id(_) => None,
            CardFilter::NameNumber { name, number } => {
                Some(format!("name:\"{}\" number:\"{}\"", name, number))
            }
            CardFilter::Name(name) => Some(format!("name:\"{}\"", name)),
        }
    }

    /// 名前のみの広域検索か（結果は手動選択へ回す）
    pub fn is_broad(&self) -> bool {
        matches!(self, CardFilter::Name(_))
    }
}

/// カタログ検索のポート。テストではスタブに差し替える
pub trait CatalogLookup {
    fn query(&self, filter: &CardFilter) -> Vec<CatalogCandidate>;
}

/// Pokémon TCG API v2 クライアント
///
/// プロセス起動時に一度だけ構築して各コンポーネントへ注入する。
pub struct TcgCatalogClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TcgCatalogClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key(),
        })
    }

    fn get(&self, url: &str, query: Option<&str>) -> reqwest::Result<serde_json::Value> {
        let mut request = self.http.get(url);
        if let Some(q) = query {
            request = request.query(&[("q", q)]);
        }
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }

        request.send()?.error_for_status()?.json()
    }

    /// `data` は配列（検索）と単一オブジェクト（ID取得）の両形がある
    fn parse_payload(payload: serde_json::Value) -> Vec<CatalogCandidate> {
        match payload.get("data") {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|v| serde_json::from_value::<ApiCard>(v.clone()).ok())
                .map(CatalogCandidate::from)
                .collect(),
            Some(obj @ serde_json::Value::Object(_)) => {
                serde_json::from_value::<ApiCard>(obj.clone())
                    .map(|card| vec![CatalogCandidate::from(card)])
                    .unwrap_or_default()
            }
            // `data` なしは「結果なし」であってエラーではない
            _ => Vec::new(),
        }
    }
}

impl CatalogLookup for TcgCatalogClient {
    fn query(&self, filter: &CardFilter) -> Vec<CatalogCandidate> {
        let result = match filter {
            CardFilter::Id(id) => {
                let url = format!("{}/cards/{}", self.base_url, id);
                self.get(&url, None)
            }
            _ => {
                let url = format!("{}/cards", self.base_url);
                self.get(&url, filter.query_expression().as_deref())
            }
        };

        match result {
            Ok(payload) => Self::parse_payload(payload),
            Err(e) => {
                println!("⚠ カタログ検索失敗 ({:?}): {}", filter, e);
                Vec::new()
            }
        }
    }
}
