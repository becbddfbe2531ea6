//! カード番号の正規化
//!
//! カタログ側の番号はゼロ埋めされていないため、照合前に統一する:
//! - "/総数" サフィックスを除去（`4/102` → `4`）
//! - 純数値なら先頭のゼロを除去（`025` → `25`）
//! - 英字を含む番号はそのまま（`SWSH001` 等）

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PURE_DIGITS: Regex = Regex::new(r"^\d+$").unwrap();
}

pub fn normalize_number(raw: &str) -> String {
    let base = raw.split('/').next().unwrap_or("").trim();

    if PURE_DIGITS.is_match(base) {
        let stripped = base.trim_start_matches('0');
        if stripped.is_empty() {
            // "000" のような表記は "0" として残す
            "0".to_string()
        } else {
            stripped.to_string()
        }
    } else {
        base.to_string()
    }
}

/// 正規化後の番号同士を文字列として比較する
/// （"SWSH001" のような非数値番号があるため整数比較はしない）
pub fn numbers_match(a: &str, b: &str) -> bool {
    !a.trim().is_empty() && normalize_number(a) == normalize_number(b)
}
