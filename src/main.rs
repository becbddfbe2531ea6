use cardsync_rust::{catalog, cli, config, driver, error, prices, resolver, sheet};
use catalog::TcgCatalogClient;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use driver::BatchDriver;
use error::{CardSyncError, Result};
use resolver::{ConsoleResolver, DeferResolver};
use sheet::{SheetStore, SheetWriter, XlsxStore};
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Sync {
            workbook,
            no_prompt,
            interval,
        } => {
            println!("🃏 cardsync - コレクション同期\n");

            let path = resolve_workbook(workbook, &config)?;

            // 1. ワークブック読み込み（開けなければここで中断）
            println!("[1/3] ワークブックを読み込み中...");
            let mut store = XlsxStore::open(&path, &config)?;
            let rows = store.collection_rows()?;
            println!("✔ {}行を検出\n", rows.len());

            // 2. カタログ照合・書き込み
            println!("[2/3] カタログと照合中...");
            let client = TcgCatalogClient::new(&config)?;
            let mut writer = SheetWriter::new(store);
            let interval = Duration::from_millis(interval.unwrap_or(config.request_interval_ms));

            let report = if no_prompt {
                BatchDriver::new(&client, &mut writer, &DeferResolver, interval, cli.verbose)
                    .run(&rows)?
            } else {
                BatchDriver::new(&client, &mut writer, &ConsoleResolver, interval, cli.verbose)
                    .run(&rows)?
            };
            println!("✔ 照合完了\n");

            // 3. 保存
            println!("[3/3] ワークブックを保存中...");
            writer.into_store().save()?;
            println!("✔ 保存: {}", path.display());

            println!(
                "\n✅ 同期完了: 更新 {} / 見つからず {} / 要選択 {} / エラー {}",
                report.updated, report.not_found, report.ambiguous, report.errored
            );
        }

        Commands::Prices { workbook, interval } => {
            println!("💰 cardsync - 価格更新\n");

            let path = resolve_workbook(workbook, &config)?;

            println!("[1/3] ワークブックを読み込み中...");
            let store = XlsxStore::open(&path, &config)?;
            println!("✔ 読み込み完了\n");

            println!("[2/3] 価格を取得中...");
            let client = TcgCatalogClient::new(&config)?;
            let mut writer = SheetWriter::new(store);
            let interval = Duration::from_millis(interval.unwrap_or(config.request_interval_ms));
            let report = prices::refresh(&client, &mut writer, interval, cli.verbose)?;
            println!("✔ 取得完了\n");

            println!("[3/3] ワークブックを保存中...");
            writer.into_store().save()?;
            println!("✔ 保存: {}", path.display());

            println!(
                "\n✅ 価格更新完了: 更新 {} / 価格なし {} / エラー {}",
                report.updated, report.missing, report.errored
            );
        }

        Commands::Init { workbook } => {
            println!("📋 cardsync - テンプレート作成\n");

            XlsxStore::create(&workbook, &config)?;
            println!("✔ テンプレートを作成: {}", workbook.display());
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  APIベースURL: {}", config.api_base_url);
                println!("  ワークブック: {}", config.workbook.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "未設定".into()));
                println!("  シート: {} / {} / {}", config.collection_sheet, config.details_sheet, config.search_sheet);
                println!("  呼び出し間隔: {}ms", config.request_interval_ms);
                println!("  APIキー: {}", if config.api_key().is_some() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}

fn resolve_workbook(arg: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    arg.or_else(|| config.workbook.clone()).ok_or_else(|| {
        CardSyncError::Config("ワークブックのパスを指定してください（引数または設定ファイル）".into())
    })
}
