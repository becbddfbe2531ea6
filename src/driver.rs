//! バッチドライバ
//!
//! コレクション行を元の順序で走査し、行ごとに
//! カタログ検索 → 照合 → 書き込みを実行する。
//! 1行の失敗はその行で握り、残りの行の処理は続行する。
//! カタログ呼び出しの間には固定の待ち時間を入れてレート制限を守る。

use crate::catalog::{CardFilter, CatalogLookup};
use crate::error::{CardSyncError, Result};
use crate::reconciler::{self, CollectionRow, Outcome};
use crate::resolver::ChoiceResolver;
use crate::sheet::{SheetStore, SheetWriter};
use std::time::Duration;

/// バッチ実行の集計結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// レコード書き込み＋ステータス更新まで完了した行数
    pub updated: usize,
    /// 候補が見つからなかった行数（行は現状維持）
    pub not_found: usize,
    /// 手動選択待ちで保留した行数
    pub ambiguous: usize,
    /// 行単位のエラーで中断した行数
    pub errored: usize,
}

enum RowOutcome {
    Updated,
    Deferred,
    NotFound,
}

pub struct BatchDriver<'a, C, S, R>
where
    C: CatalogLookup,
    S: SheetStore,
    R: ChoiceResolver,
{
    catalog: &'a C,
    writer: &'a mut SheetWriter<S>,
    resolver: &'a R,
    /// カタログ呼び出し間の待ち時間（デフォルト1秒）
    interval: Duration,
    verbose: bool,
}

impl<'a, C, S, R> BatchDriver<'a, C, S, R>
where
    C: CatalogLookup,
    S: SheetStore,
    R: ChoiceResolver,
{
    pub fn new(
        catalog: &'a C,
        writer: &'a mut SheetWriter<S>,
        resolver: &'a R,
        interval: Duration,
        verbose: bool,
    ) -> Self {
        Self {
            catalog,
            writer,
            resolver,
            interval,
            verbose,
        }
    }

    pub fn run(&mut self, rows: &[CollectionRow]) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for row in rows {
            // fetched・空欄はスキップ（再実行しても二重処理しない）
            if !row.status.is_eligible() {
                if self.verbose {
                    println!("  行{}: ステータス「{}」のためスキップ", row.row_index, row.status.as_str());
                }
                continue;
            }

            match self.process_row(row) {
                Ok(RowOutcome::Updated) => report.updated += 1,
                Ok(RowOutcome::Deferred) => report.ambiguous += 1,
                Ok(RowOutcome::NotFound) => report.not_found += 1,
                Err(e) => {
                    // 行単位のエラーはバッチを止めない
                    println!("⚠ 行{}の処理エラー: {}", row.row_index, e);
                    let _ = self.writer.annotate(row.row_index, &e.to_string());
                    report.errored += 1;
                }
            }

            std::thread::sleep(self.interval);
        }

        Ok(report)
    }

    fn process_row(&mut self, row: &CollectionRow) -> Result<RowOutcome> {
        if row.card_name.is_empty() && row.unique_identifier.is_empty() {
            return Err(CardSyncError::MissingField {
                row: row.row_index,
                field: "Card Name".to_string(),
            });
        }

        let mut filter = CardFilter::for_row(row);
        let mut candidates = self.catalog.query(&filter);

        // 名前+番号で見つからなければ名前のみで再検索
        // （結果は広域扱いになり手動選択へ回る）。ID検索は再検索しない
        if candidates.is_empty() {
            if let CardFilter::NameNumber { name, .. } = &filter {
                filter = CardFilter::Name(name.clone());
                candidates = self.catalog.query(&filter);
            }
        }

        if self.verbose {
            println!("  行{}: 候補{}件", row.row_index, candidates.len());
        }

        match reconciler::reconcile(row, &filter, &candidates) {
            Outcome::Matched(record) => {
                self.writer.write_detail(&record)?;
                self.writer.advance_status(row.row_index)?;
                println!(
                    "✔ 行{}: {} ({}) を更新",
                    row.row_index, record.card_name, record.identifier
                );
                Ok(RowOutcome::Updated)
            }
            Outcome::Ambiguous(all) => {
                // 候補は絞り込まず全件をそのまま選択チャネルへ出す
                self.writer.publish_search_results(&all)?;
                println!(
                    "⚠ 行{} 「{}」: 候補{}件をSearch Resultsへ書き出しました",
                    row.row_index,
                    row.card_name,
                    all.len()
                );

                match self.resolver.choose(row, &all) {
                    Some(id) => match all.iter().find(|c| c.identifier == id) {
                        Some(candidate) => {
                            let record = reconciler::derive_record(row, candidate);
                            self.writer.write_detail(&record)?;
                            self.writer.advance_status(row.row_index)?;
                            self.writer.clear_search_results()?;
                            println!(
                                "✔ 行{}: {} ({}) を更新（手動選択）",
                                row.row_index, record.card_name, record.identifier
                            );
                            Ok(RowOutcome::Updated)
                        }
                        None => {
                            println!("⚠ 行{}: 候補にないID「{}」が指定されました。保留します", row.row_index, id);
                            Ok(RowOutcome::Deferred)
                        }
                    },
                    None => Ok(RowOutcome::Deferred),
                }
            }
            Outcome::NotFound => {
                println!(
                    "⚠ 行{}: 該当なし (name=「{}」 number=「{}」 id=「{}」)",
                    row.row_index, row.card_name, row.card_number, row.unique_identifier
                );
                Ok(RowOutcome::NotFound)
            }
        }
    }
}
