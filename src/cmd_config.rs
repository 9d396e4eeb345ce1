//! Settings subcommand handlers.

use tracing::info;

use grammarfix_config::{Settings, SettingsStore};
use grammarfix_core::CorrectionClient;
use grammarfix_protocols::endpoint::{EndpointConfig, WireFormatKind};
use grammarfix_runtime::default_formats;

use crate::cli::ConfigAction;

/// Handle config subcommands.
pub(crate) async fn handle_config_command(
    action: ConfigAction,
    store: &dyn SettingsStore,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => config_show(store).await,
        ConfigAction::Set {
            api_url,
            api_key,
            model,
            format,
        } => config_set(store, api_url, api_key, model, format).await,
        ConfigAction::Preset { preset } => {
            let mut settings = store.load().await?;
            settings.apply_preset(preset);
            save(store, &settings).await?;
            info!(preset = %preset, "Preset applied");
            print_settings(&settings);
            Ok(())
        }
    }
}

async fn config_show(store: &dyn SettingsStore) -> anyhow::Result<()> {
    let settings = store.load().await?;
    print_settings(&settings);
    Ok(())
}

async fn config_set(
    store: &dyn SettingsStore,
    api_url: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    format: Option<WireFormatKind>,
) -> anyhow::Result<()> {
    let mut settings = store.load().await?;
    if let Some(api_url) = api_url {
        settings.api_url = api_url.trim().to_string();
    }
    if let Some(api_key) = api_key {
        settings.api_key = api_key.trim().to_string();
    }
    if let Some(model) = model {
        settings.model = model.trim().to_string();
    }
    if format.is_some() {
        settings.format = format;
    }
    save(store, &settings).await?;
    print_settings(&settings);
    Ok(())
}

async fn save(store: &dyn SettingsStore, settings: &Settings) -> anyhow::Result<()> {
    match store.save(settings).await {
        Ok(()) => {
            println!("Settings saved successfully!");
            Ok(())
        }
        Err(e) => anyhow::bail!("Error saving settings: {}", e),
    }
}

fn print_settings(settings: &Settings) {
    let url = if settings.api_url.is_empty() {
        "(not set)"
    } else {
        settings.api_url.as_str()
    };
    let model = if settings.model.is_empty() {
        "(vendor default)"
    } else {
        settings.model.as_str()
    };
    let format = match settings.format {
        Some(format) => format.to_string(),
        None => format!("{} (inferred)", WireFormatKind::infer(&settings.api_url)),
    };

    println!("API URL: {}", url);
    println!("API key: {}", settings.masked_key());
    println!("Model:   {}", model);
    println!("Format:  {}", format);
}

/// Probe the configured endpoint.
pub(crate) async fn handle_test_command(store: &dyn SettingsStore) -> anyhow::Result<()> {
    let settings = store.load().await?;
    let endpoint = settings
        .endpoint()
        .unwrap_or_else(|_| EndpointConfig::new(String::new(), settings.api_key.clone()));

    println!("Testing connection...");
    let client = CorrectionClient::new(default_formats());
    match client.probe(&endpoint).await {
        Ok(preview) => {
            println!("✓ Connection successful! Response: {}...", preview);
            Ok(())
        }
        Err(e) => anyhow::bail!("✗ Connection failed: {}", e.detailed()),
    }
}
