use crate::sheet::WriteError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardSyncError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ワークブックが見つかりません: {0}")]
    WorkbookNotFound(String),

    #[error("ワークブック読み込みエラー: {0}")]
    WorkbookRead(#[from] calamine::Error),

    #[error("Excel生成エラー: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    #[error("シート書き込みエラー: {0}")]
    Write(#[from] WriteError),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("行{row}: 必須フィールド「{field}」が空です")]
    MissingField { row: u32, field: String },
}

pub type Result<T> = std::result::Result<T, CardSyncError>;
