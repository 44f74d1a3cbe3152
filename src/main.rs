use clap::Parser;
use dialoguer::Password;
use medvision::{cli, client, config, error, pipeline, terminal};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use medvision_common::{AnalysisParameters, FocusMode, MarkupStyle, ModelId, WorkflowController};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {}", e);
        if e.is_retryable() {
            eprintln!("   同じコマンドで再試行できます");
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "medvision=debug,medvision_common=debug"
    } else {
        "medvision=info,medvision_common=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze { image, model, focus, api_key, prompt_key, endpoint, output, no_download } => {
            println!("🏥 medvision - 画像解析\n");

            let config = Config::load()?;

            let endpoint = endpoint.unwrap_or_else(|| config.endpoint.clone());
            let api_key = resolve_api_key(api_key, prompt_key)?;

            let mut controller = WorkflowController::new(MarkupStyle::TERMINAL);
            *controller.params_mut() = AnalysisParameters::new(
                api_key,
                model.unwrap_or(config.model),
                focus.unwrap_or(config.focus),
            );

            println!("- 画像: {}", image.display());
            println!("- モデル: {}", controller.params().model);
            println!("- フォーカス: {}", controller.params().focus);
            println!("- 送信先: {}\n", endpoint);

            let service = client::HttpAnalysisService::new(&endpoint, config.timeout_seconds)?;
            let view = pipeline::analyze_file(&mut controller, &service, &image, !cli.verbose).await?;
            terminal::print_view(&view);

            if no_download {
                return Ok(());
            }

            let output_dir = config.resolve_output_dir(output.as_deref());
            match pipeline::save_report_document(&controller, &output_dir)? {
                Some(path) => println!("✔ PDF出力: {}", path.display()),
                None => println!("- PDFレポートはありません"),
            }

            println!("\n✅ 解析完了");
        }

        Commands::Models => {
            println!("モデル:");
            for model in ModelId::ALL {
                println!("  {:<10} {}", model.short_name(), model);
            }
            println!("\nフォーカス:");
            for focus in FocusMode::ALL {
                println!("  {:<12} {}", focus.short_name(), focus);
            }
        }

        Commands::Config { set_endpoint, set_model, set_focus, set_output_dir, show } => {
            let mut config = Config::load()?;
            let changed = set_endpoint.is_some()
                || set_model.is_some()
                || set_focus.is_some()
                || set_output_dir.is_some();

            if let Some(endpoint) = set_endpoint {
                config.endpoint = endpoint;
            }
            if let Some(model) = set_model {
                config.model = model;
            }
            if let Some(focus) = set_focus {
                config.focus = focus;
            }
            if let Some(dir) = set_output_dir {
                config.output_dir = Some(dir);
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  送信先: {}", config.endpoint);
                println!("  モデル: {}", config.model);
                println!("  フォーカス: {}", config.focus);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  PDF保存先: {}",
                    config.resolve_output_dir(None).display()
                );
                println!("  APIキー: 保存しません（--api-key / {}）", config::API_KEY_ENV);
            }
        }
    }

    Ok(())
}

/// 引数・環境変数・対話入力の順でAPIキーを決める
///
/// 空のまま返した場合は解析開始時に MissingCredential になる。
fn resolve_api_key(api_key: Option<String>, prompt: bool) -> Result<String> {
    let key = api_key.unwrap_or_default();
    if !key.trim().is_empty() || !prompt {
        return Ok(key);
    }

    Password::new()
        .with_prompt("Groq APIキー")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| error::MedVisionError::Io(std::io::Error::other(e.to_string())))
}
