use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use tray_price_rust::{cli, commands, config, error, interactive, session};
use cli::{Cli, Commands};
use commands::AnalyzeOptions;
use config::Config;
use error::Result;
use session::Session;

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// 必要ならゲートを通す（`--password` 優先、なければ対話入力）
fn authorize(session: &mut Session, password: Option<&str>) -> Result<()> {
    if session.requires_auth() {
        match password {
            Some(password) => session.authenticate(password)?,
            None => interactive::prompt_password(session)?,
        }
    }
    Ok(())
}

/// セッションを作り、必要ならゲートを通す
fn open_session(config: &Config, gate: bool, password: Option<&str>, verbose: bool) -> Result<Session> {
    let mut session = Session::from_config(config, gate, verbose)?;
    authorize(&mut session, password)?;

    println!("🍱 Analisis Estimasi Harga Porsi MBG\n");
    Ok(session)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;
    let password = cli.password.as_deref();

    match cli.command {
        Commands::Analyze { image, add, remove, interactive, output, excel, use_cache } => {
            let session = open_session(&config, cli.gate, password, cli.verbose)?;
            let opts = AnalyzeOptions {
                image,
                add,
                remove,
                interactive,
                output,
                excel,
                use_cache,
            };
            commands::run_analyze(&session, &config, &opts).await?;
        }

        Commands::Batch { folder, output, excel, use_cache } => {
            let session = open_session(&config, cli.gate, password, cli.verbose)?;
            commands::run_batch(
                &session,
                &config,
                &folder,
                output.as_deref(),
                excel.as_deref(),
                use_cache,
            )
            .await?;
        }

        Commands::Quote { items, output } => {
            let session = open_session(&config, cli.gate, password, cli.verbose)?;
            commands::run_quote(&session, &items, output.as_deref())?;
        }

        Commands::Prices => {
            let session = open_session(&config, cli.gate, password, cli.verbose)?;
            commands::run_prices(&session)?;
        }

        Commands::Config { set_password, set_model, require_password, show } => {
            let mut session = Session::for_config_change(&config, cli.verbose);
            if set_password.is_some() || set_model.is_some() || require_password.is_some() {
                authorize(&mut session, password)?;
            }
            commands::run_config(&session, config, set_password, set_model, require_password, show)?;
        }

        Commands::Cache { clear, folder, info } => {
            commands::run_cache(folder, clear, info)?;
        }
    }

    Ok(())
}
