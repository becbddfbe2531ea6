//! 価格更新パス
//!
//! Card Detailsシートの一意IDを持つ行について、カタログから
//! 最新価格（cardmarket平均 → TCGPlayer mid）を取り直して
//! 価格列を更新する。検索失敗・価格なしは警告して次の行へ進む。

use crate::catalog::{CardFilter, CatalogLookup};
use crate::error::Result;
use crate::sheet::{SheetStore, SheetWriter};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceReport {
    pub updated: usize,
    /// カード自体または価格情報が見つからなかった行数
    pub missing: usize,
    pub errored: usize,
}

pub fn refresh<C, S>(
    catalog: &C,
    writer: &mut SheetWriter<S>,
    interval: Duration,
    verbose: bool,
) -> Result<PriceReport>
where
    C: CatalogLookup,
    S: SheetStore,
{
    let targets = writer.store_mut().detail_identifiers()?;
    let mut report = PriceReport::default();

    for (row_index, identifier) in targets {
        let candidates = catalog.query(&CardFilter::Id(identifier.clone()));

        let price = candidates.first().and_then(|c| c.best_price());

        match price {
            Some(price) => match writer.set_price(row_index, price) {
                Ok(()) => {
                    if verbose {
                        println!("  行{}: {} → {}", row_index, identifier, price);
                    }
                    report.updated += 1;
                }
                Err(e) => {
                    println!("⚠ 行{}の価格書き込みエラー: {}", row_index, e);
                    report.errored += 1;
                }
            },
            None => {
                println!("⚠ 行{}: ID「{}」の価格が見つかりません", row_index, identifier);
                report.missing += 1;
            }
        }

        std::thread::sleep(interval);
    }

    Ok(report)
}
