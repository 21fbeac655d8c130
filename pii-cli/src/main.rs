//! CLI do mascaramento de PII: lê reclamações, escreve JSON mascarado.
//!
//! Logs vão para stderr (`RUST_LOG` controla o nível); stdout recebe apenas
//! o JSON de saída. O texto original nunca é impresso nem logado.

use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pii_core::{corpus::demo_texts, AuditSummary, MaskedResult, Masker, MaskingConfig};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about = "Mascara PII em reclamações bancárias (passo duplo)")]
struct Cli {
    /// Arquivo JSON de configuração (limiar, janela, reconhecedores extras)
    #[arg(long, env = "PII_CONFIG")]
    config: Option<PathBuf>,

    /// Sobrescreve o limiar de score da configuração
    #[arg(long, env = "PII_SCORE_THRESHOLD")]
    threshold: Option<f64>,

    /// Arquivo de entrada (padrão: stdin)
    #[arg(long, conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Cada linha é um texto independente; saída em JSON Lines
    #[arg(long)]
    lines: bool,

    /// Mascara as reclamações de exemplo embutidas
    #[arg(long)]
    demo: bool,

    /// Inclui o resumo de auditoria em cada resultado
    #[arg(long)]
    audit: bool,

    /// JSON indentado
    #[arg(long)]
    pretty: bool,
}

/// Uma linha de saída.
#[derive(Debug, Serialize)]
struct Output<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(flatten)]
    result: MaskedResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    audit: Option<AuditSummary>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let masker = Masker::new(load_config(&cli)?).context("configuração de mascaramento inválida")?;
    info!(
        threshold = masker.config().score_threshold,
        custom_recognizers = masker.config().custom_recognizers.len(),
        "motor de mascaramento pronto"
    );

    let (categories, texts) = read_texts(&cli)?;
    let results = masker.mask_batch_with_audit(&texts);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (i, (result, summary)) in results.into_iter().enumerate() {
        summary.log(&format!("req-{:04}", i + 1), result.masked_text.len());
        let line = Output {
            category: categories.get(i).copied(),
            result,
            audit: cli.audit.then_some(summary),
        };
        let json = if cli.pretty {
            serde_json::to_string_pretty(&line)
        } else {
            serde_json::to_string(&line)
        }
        .context("falha ao serializar resultado")?;
        writeln!(out, "{json}").context("falha ao escrever em stdout")?;
    }
    out.flush().context("falha ao escrever em stdout")?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<MaskingConfig> {
    let config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("não foi possível ler {}", path.display()))?;
            MaskingConfig::from_json(&raw).with_context(|| format!("configuração inválida em {}", path.display()))?
        }
        None => MaskingConfig::default(),
    };
    Ok(match cli.threshold {
        Some(threshold) => config.with_threshold(threshold),
        None => config,
    })
}

/// Textos a mascarar e, no modo demo, suas categorias.
fn read_texts(cli: &Cli) -> Result<(Vec<&'static str>, Vec<String>)> {
    if cli.demo {
        let (categories, texts) = demo_texts().into_iter().map(|(c, t)| (c, t.to_string())).unzip();
        return Ok((categories, texts));
    }

    let raw = match &cli.input {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("não foi possível ler {}", path.display()))?
        }
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("falha ao ler stdin")?;
            buf
        }
    };
    Ok((vec![], split_texts(raw, cli.lines)))
}

fn split_texts(raw: String, lines: bool) -> Vec<String> {
    if !lines {
        return vec![raw];
    }
    raw.lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}
