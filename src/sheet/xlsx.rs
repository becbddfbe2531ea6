//! ローカルxlsxワークブックのストア実装
//!
//! 起動時にcalamineで全シートをメモリへ読み込み、変更はメモリ上で
//! 行い、`save()` でrust_xlsxwriterによりワークブック全体を書き戻す。
//! 同時編集の検出はしない（後勝ち）。

use super::{SheetStore, WriteError};
use crate::catalog::CatalogCandidate;
use crate::config::Config;
use crate::error::{CardSyncError, Result};
use crate::reconciler::{CollectionRow, DetailRecord, RowStatus};
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

/// コレクションシートの列（0始まり）
const COL_STATUS: usize = 2;
const COL_NOTE: usize = 6;
/// Card Detailsシートの価格列（1始まりでは7列目）
const COL_PRICE: usize = 6;
const COL_DETAIL_ID: usize = 11;

const COLLECTION_HEADERS: [&str; 7] = [
    "Card Name",
    "Card Number",
    "Status",
    "Unique Identifier",
    "Condition",
    "Location",
    "Note",
];

const DETAIL_HEADERS: [&str; 13] = [
    "Card Name",
    "Set Name",
    "Card Number",
    "Rarity",
    "Type",
    "Subtype",
    "Price",
    "Image URL",
    "Date Added",
    "Condition",
    "Location",
    "Unique Identifier",
    "TCGPlayer URL",
];

const SEARCH_HEADERS: [&str; 10] = [
    "Card Name",
    "Set Name",
    "Card Number",
    "Rarity",
    "Type",
    "Subtype",
    "Average Sell Price",
    "Image URL",
    "Unique Identifier",
    "TCGPlayer URL",
];

pub struct XlsxStore {
    path: PathBuf,
    collection_sheet: String,
    details_sheet: String,
    search_sheet: String,
    collection: Vec<Vec<String>>,
    details: Vec<Vec<String>>,
    search: Vec<Vec<String>>,
}

impl XlsxStore {
    /// 既存のワークブックを開く。コレクションシートがなければエラー
    /// （起動時の失敗はバッチ全体を中断する）
    pub fn open(path: &Path, config: &Config) -> Result<Self> {
        if !path.exists() {
            return Err(CardSyncError::WorkbookNotFound(path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(path)?;

        let collection = sheet_to_rows(workbook.worksheet_range(&config.collection_sheet)?);

        // 追記先と検索結果シートは未作成でもよい
        let details = match workbook.worksheet_range(&config.details_sheet) {
            Ok(range) => {
                let rows = sheet_to_rows(range);
                if rows.is_empty() {
                    vec![header_row(&DETAIL_HEADERS)]
                } else {
                    rows
                }
            }
            Err(_) => vec![header_row(&DETAIL_HEADERS)],
        };
        let search = match workbook.worksheet_range(&config.search_sheet) {
            Ok(range) => {
                let rows = sheet_to_rows(range);
                if rows.is_empty() {
                    vec![header_row(&SEARCH_HEADERS)]
                } else {
                    rows
                }
            }
            Err(_) => vec![header_row(&SEARCH_HEADERS)],
        };

        Ok(Self {
            path: path.to_path_buf(),
            collection_sheet: config.collection_sheet.clone(),
            details_sheet: config.details_sheet.clone(),
            search_sheet: config.search_sheet.clone(),
            collection,
            details,
            search,
        })
    }

    /// ヘッダのみのテンプレートワークブックを作成する
    pub fn create(path: &Path, config: &Config) -> Result<Self> {
        let store = Self {
            path: path.to_path_buf(),
            collection_sheet: config.collection_sheet.clone(),
            details_sheet: config.details_sheet.clone(),
            search_sheet: config.search_sheet.clone(),
            collection: vec![header_row(&COLLECTION_HEADERS)],
            details: vec![header_row(&DETAIL_HEADERS)],
            search: vec![header_row(&SEARCH_HEADERS)],
        };
        store.save()?;
        Ok(store)
    }

    /// ワークブック全体を書き戻す
    pub fn save(&self) -> Result<()> {
        let mut workbook = Workbook::new();

        write_sheet(&mut workbook, &self.collection_sheet, &self.collection, None)?;
        // 価格列は数値セルとして書き出す
        write_sheet(
            &mut workbook,
            &self.details_sheet,
            &self.details,
            Some(COL_PRICE),
        )?;
        write_sheet(&mut workbook, &self.search_sheet, &self.search, None)?;

        workbook.save(&self.path)?;
        Ok(())
    }

    fn collection_cell(&mut self, row_index: u32, col: usize) -> std::result::Result<&mut String, WriteError> {
        let idx = row_index as usize;
        if idx < 2 || idx > self.collection.len() {
            return Err(WriteError::Store(format!(
                "コレクションシートに行{}がありません",
                row_index
            )));
        }
        let row = &mut self.collection[idx - 1];
        if row.len() <= col {
            row.resize(col + 1, String::new());
        }
        Ok(&mut row[col])
    }
}

impl SheetStore for XlsxStore {
    fn collection_rows(&mut self) -> Result<Vec<CollectionRow>> {
        let mut rows = Vec::new();

        for (idx, cells) in self.collection.iter().enumerate().skip(1) {
            // 完全な空行は無視する
            if cells.iter().all(|c| c.trim().is_empty()) {
                continue;
            }

            let cell = |col: usize| -> String {
                cells.get(col).map(|c| c.trim().to_string()).unwrap_or_default()
            };

            rows.push(CollectionRow {
                row_index: idx as u32 + 1,
                card_name: cell(0),
                card_number: cell(1),
                status: RowStatus::parse(&cell(2)),
                unique_identifier: cell(3),
                condition: cell(4),
                location: cell(5),
            });
        }

        Ok(rows)
    }

    fn detail_identifiers(&mut self) -> Result<Vec<(u32, String)>> {
        let mut identifiers = Vec::new();

        for (idx, cells) in self.details.iter().enumerate().skip(1) {
            let id = cells
                .get(COL_DETAIL_ID)
                .map(|c| c.trim().to_string())
                .unwrap_or_default();
            if !id.is_empty() {
                identifiers.push((idx as u32 + 1, id));
            }
        }

        Ok(identifiers)
    }

    fn append_detail(&mut self, record: &DetailRecord) -> std::result::Result<(), WriteError> {
        self.details.push(vec![
            record.card_name.clone(),
            record.set_name.clone(),
            record.number.clone(),
            record.rarity.clone(),
            record.primary_type.clone(),
            record.primary_subtype.clone(),
            record.price.map(|p| p.to_string()).unwrap_or_default(),
            record.image_url.clone(),
            record.date_added.clone(),
            record.condition.clone(),
            record.location.clone(),
            record.identifier.clone(),
            record.marketplace_url.clone(),
        ]);
        Ok(())
    }

    fn set_status(
        &mut self,
        row_index: u32,
        status: RowStatus,
    ) -> std::result::Result<(), WriteError> {
        *self.collection_cell(row_index, COL_STATUS)? = status.as_str().to_string();
        // ステータス更新と同時に過去のエラー注記を消す
        *self.collection_cell(row_index, COL_NOTE)? = String::new();
        Ok(())
    }

    fn set_note(&mut self, row_index: u32, note: &str) -> std::result::Result<(), WriteError> {
        *self.collection_cell(row_index, COL_NOTE)? = note.to_string();
        Ok(())
    }

    fn set_price(&mut self, row_index: u32, price: f64) -> std::result::Result<(), WriteError> {
        let idx = row_index as usize;
        if idx < 2 || idx > self.details.len() {
            return Err(WriteError::Store(format!(
                "Card Detailsシートに行{}がありません",
                row_index
            )));
        }
        let row = &mut self.details[idx - 1];
        if row.len() <= COL_PRICE {
            row.resize(COL_PRICE + 1, String::new());
        }
        row[COL_PRICE] = price.to_string();
        Ok(())
    }

    fn publish_search_results(
        &mut self,
        candidates: &[CatalogCandidate],
    ) -> std::result::Result<(), WriteError> {
        let mut rows = vec![header_row(&SEARCH_HEADERS)];
        for c in candidates {
            rows.push(vec![
                c.name.clone(),
                c.set_name.clone(),
                c.number.clone(),
                c.rarity.clone(),
                c.types.first().cloned().unwrap_or_default(),
                c.subtypes.first().cloned().unwrap_or_default(),
                c.average_sell_price.map(|p| p.to_string()).unwrap_or_default(),
                c.image_url.clone(),
                c.identifier.clone(),
                c.marketplace_url.clone(),
            ]);
        }
        self.search = rows;
        Ok(())
    }

    fn clear_search_results(&mut self) -> std::result::Result<(), WriteError> {
        self.search = vec![header_row(&SEARCH_HEADERS)];
        Ok(())
    }
}

fn header_row(headers: &[&str]) -> Vec<String> {
    headers.iter().map(|h| h.to_string()).collect()
}

fn sheet_to_rows(range: calamine::Range<Data>) -> Vec<Vec<String>> {
    range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect()
}

/// セル値を文字列へ。番号セルが数値として保存されている場合に
/// "25.0" ではなく "25" と読めるようにする
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        _ => String::new(),
    }
}

fn write_sheet(
    workbook: &mut Workbook,
    name: &str,
    rows: &[Vec<String>],
    numeric_col: Option<usize>,
) -> Result<()> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(name)?;

    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            if r > 0 && numeric_col == Some(c) {
                if let Ok(value) = cell.parse::<f64>() {
                    worksheet.write_number(r as u32, c as u16, value)?;
                    continue;
                }
            }
            worksheet.write_string(r as u32, c as u16, cell)?;
        }
    }

    Ok(())
}
