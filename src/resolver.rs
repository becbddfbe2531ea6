//! 手動選択（曖昧解決）のポート
//!
//! 広域検索や番号で絞り込めなかった行は、候補一覧をSearch Results
//! シートへ出した上で、このポート経由で一意IDの選択を得る。
//! コンソール対話・ファイルキュー・テストスタブのいずれでも
//! 差し替えられる。

use crate::catalog::CatalogCandidate;
use crate::reconciler::CollectionRow;
use dialoguer::Select;

pub trait ChoiceResolver {
    /// 行と候補一覧から、選択された一意IDを得る。Noneなら保留
    fn choose(&self, row: &CollectionRow, candidates: &[CatalogCandidate]) -> Option<String>;
}

/// コンソールで候補を選択する
pub struct ConsoleResolver;

impl ChoiceResolver for ConsoleResolver {
    fn choose(&self, row: &CollectionRow, candidates: &[CatalogCandidate]) -> Option<String> {
        let mut items: Vec<String> = candidates.iter().map(describe_candidate).collect();
        items.push("（スキップ: この行は保留する）".to_string());

        let prompt = format!(
            "行{} 「{}」の候補が{}件あります。書き込むカードを選択してください",
            row.row_index,
            row.card_name,
            candidates.len()
        );

        let selection = Select::new()
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact()
            .ok()?;

        candidates.get(selection).map(|c| c.identifier.clone())
    }
}

/// 常に保留する（`--no-prompt` 実行用）。行は次回実行まで現状維持
pub struct DeferResolver;

impl ChoiceResolver for DeferResolver {
    fn choose(&self, _row: &CollectionRow, _candidates: &[CatalogCandidate]) -> Option<String> {
        None
    }
}

fn describe_candidate(c: &CatalogCandidate) -> String {
    format!(
        "{} | {} | No.{} | {} | {}",
        c.name,
        c.set_name,
        c.number,
        if c.rarity.is_empty() { "-" } else { &c.rarity },
        c.identifier
    )
}
