//! ポケモンカードコレクション同期・カード情報取得ツール

pub mod catalog;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod prices;
pub mod reconciler;
pub mod resolver;
pub mod sheet;
