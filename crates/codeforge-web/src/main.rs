// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! CodeForge web server.
//!
//! Serves the single-page UI and the `/api/forge` endpoint, backed by an
//! Ollama (or OpenAI-compatible) model server.

mod server;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use codeforge::{Forge, Strategy};
use codeforge_client::{LmClient, LmConfig, OllamaProvider, OpenAiProvider, Provider};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Chain-of-thought prompting
    Cot,
    /// ReAct prompting with stub tools
    React,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProviderArg {
    /// Native Ollama generate API
    Ollama,
    /// OpenAI-compatible chat completions API
    Openai,
}

#[derive(Debug, Parser)]
#[command(name = "codeforge-web", about = "Code analysis pipeline over a local LM")]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 7860)]
    port: u16,

    /// Prompting strategy for all pipeline stages
    #[arg(long, value_enum, default_value_t = StrategyArg::Cot)]
    strategy: StrategyArg,

    /// Model name (defaults to codellama:7b for cot, llama3.2:3b for react)
    #[arg(long)]
    model: Option<String>,

    /// Base URL of the model server
    #[arg(long, default_value = "http://localhost:11434")]
    base_url: String,

    /// Model server protocol
    #[arg(long, value_enum, default_value_t = ProviderArg::Ollama)]
    provider: ProviderArg,

    /// API key for OpenAI-compatible servers that require one
    #[arg(long, env = "CODEFORGE_API_KEY")]
    api_key: Option<String>,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.2)]
    temperature: f32,
}

impl Cli {
    fn strategy(&self) -> Strategy {
        match self.strategy {
            StrategyArg::Cot => Strategy::ChainOfThought,
            StrategyArg::React => Strategy::React,
        }
    }

    fn model(&self) -> String {
        match (&self.model, self.strategy) {
            (Some(model), _) => model.clone(),
            (None, StrategyArg::Cot) => "codellama:7b".to_string(),
            (None, StrategyArg::React) => "llama3.2:3b".to_string(),
        }
    }

    fn provider(&self) -> Box<dyn Provider> {
        match self.provider {
            ProviderArg::Ollama => Box::new(OllamaProvider::new(self.base_url.clone())),
            ProviderArg::Openai => {
                let mut provider = OpenAiProvider::new(self.base_url.clone());
                if let Some(api_key) = &self.api_key {
                    provider = provider.with_api_key(api_key.clone());
                }
                Box::new(provider)
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codeforge_web=info,codeforge=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = LmConfig::for_model(cli.model()).with_temperature(cli.temperature);
    tracing::info!(
        model = %config.model,
        strategy = ?cli.strategy,
        base_url = %cli.base_url,
        "configuring pipeline"
    );

    let lm = Arc::new(LmClient::new(config, cli.provider()));
    let forge = Arc::new(Forge::with_strategy(lm, cli.strategy()));
    let router = server::create_router(forge);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind server to {}", addr))?;

    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for Ctrl+C");
        return;
    }
    tracing::info!("shutting down");
}
