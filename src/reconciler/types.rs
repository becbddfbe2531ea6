//! コレクション行と出力レコードの型定義

/// コレクションシートの処理ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowStatus {
    /// 名前+番号で自動照合する行
    Pending,
    /// 名前検索で候補一覧から手動選択する行
    Search,
    /// 取得済み（再実行時はスキップ）
    Fetched,
    /// 空欄または未知の値（処理対象外）
    #[default]
    Blank,
}

impl RowStatus {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pending" => RowStatus::Pending,
            "search" => RowStatus::Search,
            "fetched" => RowStatus::Fetched,
            _ => RowStatus::Blank,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Pending => "pending",
            RowStatus::Search => "search",
            RowStatus::Fetched => "fetched",
            RowStatus::Blank => "",
        }
    }

    /// 同期バッチの処理対象か
    pub fn is_eligible(&self) -> bool {
        matches!(self, RowStatus::Pending | RowStatus::Search)
    }
}

/// コレクションシートの1行（行1はヘッダ、データは行2から）
#[derive(Debug, Clone, Default)]
pub struct CollectionRow {
    /// 1始まりのシート行番号（ヘッダ込み）
    pub row_index: u32,
    pub card_name: String,
    /// "025" や "4/102" のような表記を許容
    pub card_number: String,
    pub status: RowStatus,
    /// カタログ側の一意ID。設定されていれば名前/番号より優先
    pub unique_identifier: String,
    pub condition: String,
    pub location: String,
}

/// Card Detailsシートへ追記する正規化済みレコード
#[derive(Debug, Clone, Default)]
pub struct DetailRecord {
    pub identifier: String,
    pub card_name: String,
    pub set_name: String,
    pub number: String,
    pub rarity: String,
    pub primary_type: String,
    pub primary_subtype: String,
    pub price: Option<f64>,
    pub image_url: String,
    /// 照合実行時のローカル日付（YYYY-MM-DD）
    pub date_added: String,
    pub condition: String,
    pub location: String,
    pub marketplace_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!(RowStatus::parse("Pending"), RowStatus::Pending);
        assert_eq!(RowStatus::parse("SEARCH"), RowStatus::Search);
        assert_eq!(RowStatus::parse(" fetched "), RowStatus::Fetched);
    }

    #[test]
    fn test_status_parse_unknown_is_blank() {
        assert_eq!(RowStatus::parse(""), RowStatus::Blank);
        assert_eq!(RowStatus::parse("done"), RowStatus::Blank);
    }

    #[test]
    fn test_status_eligibility() {
        assert!(RowStatus::Pending.is_eligible());
        assert!(RowStatus::Search.is_eligible());
        assert!(!RowStatus::Fetched.is_eligible());
        assert!(!RowStatus::Blank.is_eligible());
    }
}
