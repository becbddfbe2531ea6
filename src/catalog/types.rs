//! カタログAPIレスポンスの型定義
//!
//! Pokémon TCG API v2 のカードオブジェクトから、照合に使う
//! フィールドだけを取り出して `CatalogCandidate` に平坦化する。

use serde::Deserialize;

/// APIの生レスポンス（ネスト構造、camelCase）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiCard {
    pub id: String,
    pub name: String,
    pub number: String,
    pub rarity: String,
    pub types: Vec<String>,
    pub subtypes: Vec<String>,
    pub set: ApiSet,
    pub images: ApiImages,
    pub cardmarket: Option<ApiCardmarket>,
    pub tcgplayer: Option<ApiTcgplayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiSet {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiImages {
    pub small: String,
    pub large: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiCardmarket {
    pub prices: ApiCardmarketPrices,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiCardmarketPrices {
    pub average_sell_price: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiTcgplayer {
    pub url: String,
    pub prices: ApiTcgplayerPrices,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiTcgplayerPrices {
    pub normal: Option<ApiPriceRange>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiPriceRange {
    pub mid: Option<f64>,
}

/// 照合に使う平坦化済みの候補カード
///
/// クエリごとにAPIから取り直し、行をまたいでキャッシュしない。
#[derive(Debug, Clone, Default)]
pub struct CatalogCandidate {
    pub identifier: String,
    pub name: String,
    pub set_name: String,
    pub number: String,
    pub rarity: String,
    pub types: Vec<String>,
    pub subtypes: Vec<String>,
    pub average_sell_price: Option<f64>,
    /// cardmarketの平均価格がない場合の代替（TCGPlayer normal mid）
    pub tcgplayer_mid: Option<f64>,
    pub image_url: String,
    pub marketplace_url: String,
}

impl From<ApiCard> for CatalogCandidate {
    fn from(card: ApiCard) -> Self {
        let average_sell_price = card
            .cardmarket
            .as_ref()
            .and_then(|cm| cm.prices.average_sell_price);
        let tcgplayer_mid = card
            .tcgplayer
            .as_ref()
            .and_then(|t| t.prices.normal.as_ref())
            .and_then(|n| n.mid);
        let marketplace_url = card
            .tcgplayer
            .as_ref()
            .map(|t| t.url.clone())
            .unwrap_or_default();

        Self {
            identifier: card.id,
            name: card.name,
            set_name: card.set.name,
            number: card.number,
            rarity: card.rarity,
            types: card.types,
            subtypes: card.subtypes,
            average_sell_price,
            tcgplayer_mid,
            image_url: card.images.small,
            marketplace_url,
        }
    }
}

impl CatalogCandidate {
    /// 記録する価格: cardmarket平均 → TCGPlayer mid → なし
    pub fn best_price(&self) -> Option<f64> {
        self.average_sell_price.or(self.tcgplayer_mid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_card() {
        let json = r#"{
            "id": "base1-25",
            "name": "Pikachu",
            "number": "25",
            "rarity": "Common",
            "types": ["Lightning"],
            "subtypes": ["Basic"],
            "set": { "name": "Base" },
            "images": { "small": "https://example.com/base1-25.png" },
            "cardmarket": { "prices": { "averageSellPrice": 1.5 } },
            "tcgplayer": { "url": "https://example.com/tcg", "prices": { "normal": { "mid": 2.0 } } }
        }"#;

        let card: ApiCard = serde_json::from_str(json).unwrap();
        let candidate = CatalogCandidate::from(card);

        assert_eq!(candidate.identifier, "base1-25");
        assert_eq!(candidate.set_name, "Base");
        assert_eq!(candidate.average_sell_price, Some(1.5));
        assert_eq!(candidate.tcgplayer_mid, Some(2.0));
        assert_eq!(candidate.best_price(), Some(1.5));
        assert_eq!(candidate.marketplace_url, "https://example.com/tcg");
    }

    #[test]
    fn test_parse_api_card_missing_optionals() {
        // rarity/types/価格情報がないカードも許容する
        let json = r#"{ "id": "xy1-1", "name": "Venusaur-EX", "number": "1", "set": { "name": "XY" }, "images": {} }"#;

        let card: ApiCard = serde_json::from_str(json).unwrap();
        let candidate = CatalogCandidate::from(card);

        assert_eq!(candidate.identifier, "xy1-1");
        assert!(candidate.rarity.is_empty());
        assert!(candidate.types.is_empty());
        assert_eq!(candidate.best_price(), None);
    }

    #[test]
    fn test_best_price_falls_back_to_tcgplayer() {
        let candidate = CatalogCandidate {
            average_sell_price: None,
            tcgplayer_mid: Some(3.25),
            ..Default::default()
        };
        assert_eq!(candidate.best_price(), Some(3.25));
    }
}
