//! 行照合エンジンのテスト
//!
//! 照合ポリシー（ID優先・番号絞り込み・曖昧判定）と
//! レコード導出を検証する

use cardsync_rust::catalog::{CardFilter, CatalogCandidate};
use cardsync_rust::reconciler::{derive_record, reconcile, CollectionRow, Outcome, RowStatus};

fn candidate(id: &str, name: &str, number: &str) -> CatalogCandidate {
    CatalogCandidate {
        identifier: id.to_string(),
        name: name.to_string(),
        number: number.to_string(),
        set_name: "Base".to_string(),
        rarity: "Common".to_string(),
        types: vec!["Lightning".to_string()],
        subtypes: vec!["Basic".to_string()],
        ..Default::default()
    }
}

fn row(name: &str, number: &str, status: RowStatus, id: &str) -> CollectionRow {
    CollectionRow {
        row_index: 2,
        card_name: name.to_string(),
        card_number: number.to_string(),
        status,
        unique_identifier: id.to_string(),
        condition: "Good".to_string(),
        location: "Binder 1".to_string(),
    }
}

fn number_filter(name: &str, number: &str) -> CardFilter {
    CardFilter::NameNumber {
        name: name.to_string(),
        number: number.to_string(),
    }
}

/// 一意IDは名前/番号より優先して完全一致のみ採用する
#[test]
fn test_identifier_is_authoritative() {
    let r = row("Pikachu", "25", RowStatus::Pending, "base2-60");
    let candidates = vec![
        // 名前も番号も行と一致するが、IDが違うので選ばれてはいけない
        candidate("base1-25", "Pikachu", "25"),
        candidate("base2-60", "Pikachu", "60"),
    ];

    match reconcile(&r, &CardFilter::Id("base2-60".into()), &candidates) {
        Outcome::Matched(record) => assert_eq!(record.identifier, "base2-60"),
        other => panic!("Matchedであるべき: {:?}", other),
    }
}

/// ID不一致は名前/番号へフォールバックせず該当なし
#[test]
fn test_identifier_miss_is_not_found() {
    let r = row("Pikachu", "25", RowStatus::Pending, "xy1-99");
    let candidates = vec![candidate("base1-25", "Pikachu", "25")];

    assert!(matches!(
        reconcile(&r, &CardFilter::Id("xy1-99".into()), &candidates),
        Outcome::NotFound
    ));
}

/// 候補なしは該当なし
#[test]
fn test_empty_candidates_is_not_found() {
    let r = row("Pikachu", "25", RowStatus::Pending, "");
    assert!(matches!(
        reconcile(&r, &number_filter("Pikachu", "25"), &[]),
        Outcome::NotFound
    ));
}

/// 番号スコープの検索で候補1件ならそのまま採用（シナリオA）
#[test]
fn test_single_candidate_matches() {
    let r = row("Pikachu", "025", RowStatus::Pending, "");
    let candidates = vec![candidate("base1-25", "Pikachu", "25")];

    match reconcile(&r, &number_filter("Pikachu", "25"), &candidates) {
        Outcome::Matched(record) => {
            assert_eq!(record.identifier, "base1-25");
            // レコードの番号はカタログ側の表記（ゼロ埋めなし）
            assert_eq!(record.number, "25");
            assert_eq!(record.rarity, "Common");
        }
        other => panic!("Matchedであるべき: {:?}", other),
    }
}

/// 複数候補は正規化済み番号の文字列比較で1件に絞る
#[test]
fn test_narrow_by_normalized_number() {
    let r = row("Pikachu", "025/102", RowStatus::Pending, "");
    let candidates = vec![
        candidate("base1-25", "Pikachu", "25"),
        candidate("base2-60", "Pikachu", "60"),
    ];

    match reconcile(&r, &number_filter("Pikachu", "25"), &candidates) {
        Outcome::Matched(record) => assert_eq!(record.identifier, "base1-25"),
        other => panic!("Matchedであるべき: {:?}", other),
    }
}

/// 英字混じりの番号は整数ではなく文字列として比較する
#[test]
fn test_number_compare_is_string_based() {
    let r = row("Zacian V", "SWSH001", RowStatus::Pending, "");
    let candidates = vec![
        candidate("swshp-SWSH001", "Zacian V", "SWSH001"),
        candidate("swsh1-138", "Zacian V", "138"),
    ];

    match reconcile(&r, &number_filter("Zacian V", "SWSH001"), &candidates) {
        Outcome::Matched(record) => assert_eq!(record.identifier, "swshp-SWSH001"),
        other => panic!("Matchedであるべき: {:?}", other),
    }
}

/// 番号で1件に絞れない場合は勝手に選ばず全候補を曖昧として返す
#[test]
fn test_multiple_number_matches_are_ambiguous() {
    let r = row("Pikachu", "25", RowStatus::Pending, "");
    let candidates = vec![
        candidate("base1-25", "Pikachu", "25"),
        candidate("cel25-25", "Pikachu", "25"),
        candidate("base2-60", "Pikachu", "60"),
    ];

    match reconcile(&r, &number_filter("Pikachu", "25"), &candidates) {
        // 絞り込み後ではなく、検索で返った全件を保持する
        Outcome::Ambiguous(list) => assert_eq!(list.len(), 3),
        other => panic!("Ambiguousであるべき: {:?}", other),
    }
}

/// 名前のみの広域検索は1件でも手動選択へ回す
#[test]
fn test_broad_search_is_always_ambiguous() {
    let r = row("Charizard", "", RowStatus::Search, "");
    let candidates = vec![candidate("base1-4", "Charizard", "4")];

    match reconcile(&r, &CardFilter::Name("Charizard".into()), &candidates) {
        Outcome::Ambiguous(list) => assert_eq!(list.len(), 1),
        other => panic!("Ambiguousであるべき: {:?}", other),
    }
}

/// レコード導出: 先頭タイプ・価格フォールバック・行側の状態引き継ぎ
#[test]
fn test_derive_record_fields() {
    let r = row("pikachu", "025", RowStatus::Pending, "");
    let mut c = candidate("base1-25", "Pikachu", "25");
    c.types = vec!["Lightning".to_string(), "Colorless".to_string()];
    c.subtypes = vec!["Basic".to_string()];
    c.average_sell_price = None;
    c.tcgplayer_mid = Some(2.5);
    c.image_url = "https://example.com/base1-25.png".to_string();
    c.marketplace_url = "https://example.com/tcg".to_string();

    let record = derive_record(&r, &c);

    // カード名はカタログ側の正規表記
    assert_eq!(record.card_name, "Pikachu");
    assert_eq!(record.primary_type, "Lightning");
    assert_eq!(record.primary_subtype, "Basic");
    // cardmarket平均がなければTCGPlayer midへフォールバック
    assert_eq!(record.price, Some(2.5));
    assert_eq!(record.condition, "Good");
    assert_eq!(record.location, "Binder 1");
    assert_eq!(
        record.date_added,
        chrono::Local::now().format("%Y-%m-%d").to_string()
    );
}

/// タイプ・サブタイプがないカードは空欄のまま
#[test]
fn test_derive_record_missing_types() {
    let r = row("Energy", "100", RowStatus::Pending, "");
    let mut c = candidate("base1-100", "Energy", "100");
    c.types = Vec::new();
    c.subtypes = Vec::new();
    c.average_sell_price = None;
    c.tcgplayer_mid = None;

    let record = derive_record(&r, &c);

    assert!(record.primary_type.is_empty());
    assert!(record.primary_subtype.is_empty());
    assert_eq!(record.price, None);
}
