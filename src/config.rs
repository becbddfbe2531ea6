use crate::error::{CardSyncError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base_url: String,
    /// 省略時コマンドライン引数のワークブックを使用
    pub workbook: Option<PathBuf>,
    pub collection_sheet: String,
    pub details_sheet: String,
    pub search_sheet: String,
    /// カタログAPI呼び出しの最小間隔（ミリ秒）
    pub request_interval_ms: u64,
    pub timeout_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CardSyncError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("cardsync").join("config.json"))
    }

    /// 環境変数を優先。APIキーなしでもカタログは応答する（レート制限が厳しくなるのみ）
    pub fn api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var("POKEMON_TCG_API_KEY") {
            if !key.trim().is_empty() {
                return Some(key);
            }
        }

        self.api_key.clone()
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: "https://api.pokemontcg.io/v2".into(),
            workbook: None,
            collection_sheet: "Collection".into(),
            details_sheet: "Card Details".into(),
            search_sheet: "Search Results".into(),
            request_interval_ms: 1000,  // APIレート制限対策
            timeout_seconds: 30,
        }
    }
}
