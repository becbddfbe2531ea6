use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cardsync")]
#[command(about = "ポケモンカードコレクション同期・カード情報取得ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// コレクションシートをカタログAPIと同期する
    Sync {
        /// ワークブック（.xlsx）のパス（省略時は設定ファイルの値）
        workbook: Option<PathBuf>,

        /// 手動選択プロンプトを出さない（曖昧な行は保留のまま）
        #[arg(long)]
        no_prompt: bool,

        /// カタログAPI呼び出しの間隔（ミリ秒）
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Card Detailsシートの価格を最新化する
    Prices {
        /// ワークブック（.xlsx）のパス（省略時は設定ファイルの値）
        workbook: Option<PathBuf>,

        /// カタログAPI呼び出しの間隔（ミリ秒）
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// ヘッダのみのテンプレートワークブックを作成する
    Init {
        /// 作成先のパス
        #[arg(required = true)]
        workbook: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
