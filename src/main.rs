use anyhow::{Context, Result, bail};
use escolha_certa::client::api::ApiClient;
use escolha_certa::config::Config;
use escolha_certa::model::types::InstitutionType;
use escolha_certa::seed::{builtin_catalog, load_batch, run_seed};
use escolha_certa::server;
use escolha_certa::storage::memory::DocumentStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const PREVIEW_LIMIT: usize = 3;

#[derive(Debug, Default)]
struct Flags {
    from: Option<PathBuf>,
    tipo: Option<String>,
    q: Option<String>,
    limit: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let mut config = Config::load()?;
    let mut flags = Flags::default();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                config.bind = flag_value(&args, i)?.parse().context("Invalid --bind address")?;
                i += 2;
            }
            "--data" => {
                config.data_path = PathBuf::from(flag_value(&args, i)?);
                i += 2;
            }
            "--api" => {
                config.api_url = flag_value(&args, i)?.trim_end_matches('/').to_string();
                i += 2;
            }
            "--from" => {
                flags.from = Some(PathBuf::from(flag_value(&args, i)?));
                i += 2;
            }
            "--tipo" => {
                flags.tipo = Some(flag_value(&args, i)?.to_string());
                i += 2;
            }
            "--q" => {
                flags.q = Some(flag_value(&args, i)?.to_string());
                i += 2;
            }
            "--limit" => {
                flags.limit = Some(flag_value(&args, i)?.parse().context("Invalid --limit")?);
                i += 2;
            }
            other => {
                tracing::warn!("Ignoring unknown argument {:?}", other);
                i += 1;
            }
        }
    }

    match args[1].as_str() {
        "serve" => server::serve(&config).await,
        "seed" => seed(&config, flags).await,
        "browse" => browse(&config, flags).await,
        other => {
            eprintln!("Unknown command: {other}");
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} <serve|seed|browse> [options]");
    eprintln!("  serve  [--bind <addr:port>] [--data <file>]");
    eprintln!("  seed   [--data <file>] [--from <batch.json>]");
    eprintln!("  browse [--api <url>] [--tipo <type>] [--q <text>] [--limit <n>]");
    eprintln!("Example: {program} seed --data data/escolas.json");
    eprintln!("Example: {program} browse --q \"politecnico porto\"");
}

fn flag_value(args: &[String], i: usize) -> Result<&str> {
    match args.get(i + 1) {
        Some(value) => Ok(value),
        None => bail!("{} requires a value", args[i]),
    }
}

async fn seed(config: &Config, flags: Flags) -> Result<()> {
    tracing::info!("Opening collection at {}", config.data_path.display());
    let store = DocumentStore::open(&config.data_path).await?;

    let batch = match &flags.from {
        Some(path) => load_batch(path).await?,
        None => builtin_catalog()?,
    };

    if let Err(e) = run_seed(&store, batch).await {
        tracing::error!("Seeding failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}

async fn browse(config: &Config, flags: Flags) -> Result<()> {
    let client = ApiClient::new(&config.api_url);
    let limit = flags.limit.unwrap_or(PREVIEW_LIMIT);

    if flags.tipo.is_some() || flags.q.is_some() {
        let kind = flags.tipo.as_deref().map(InstitutionType::from_label);
        let results = client.list(kind.as_ref(), flags.q.as_deref()).await?;

        if results.is_empty() {
            println!("Nenhuma escola encontrada.");
            return Ok(());
        }

        println!("Resultados ({}):", results.len());
        for institution in results {
            println!(
                "- {} | {} | {}",
                institution.name,
                institution.kind,
                institution.locality.as_deref().unwrap_or("N/A")
            );
        }
        return Ok(());
    }

    let categories = client.categories().await?;
    for bucket in categories.buckets() {
        println!("{} ({})", bucket.kind, bucket.len());

        if bucket.is_empty() {
            println!("  Nenhum item nesta categoria.");
            continue;
        }

        let (shown, remaining) = bucket.preview(limit);
        for institution in shown {
            println!(
                "  - {} ({})",
                institution.name,
                institution.locality.as_deref().unwrap_or("Localidade não indicada")
            );
        }
        if remaining > 0 {
            println!("  ... mais {remaining}");
        }
    }

    Ok(())
}
