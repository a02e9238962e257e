use multicompute_model::{ChannelPatch, NewChannel};
use multicompute_provider::DataProvider;

use crate::output::{self, OutputFormat};

pub async fn list(provider: &dyn DataProvider, format: OutputFormat) -> anyhow::Result<()> {
    let channels = provider.get_channels().await?;
    output::print(&channels, format)
}

pub async fn create(
    provider: &dyn DataProvider,
    draft: NewChannel,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let channel = provider.create_channel(draft).await?;
    match format {
        OutputFormat::Json => output::print_one(&channel),
        OutputFormat::Text => {
            println!("✓ Created channel {}", channel.id);
            Ok(())
        }
    }
}

pub async fn update(
    provider: &dyn DataProvider,
    id: &str,
    patch: ChannelPatch,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if patch.is_empty() {
        anyhow::bail!("nothing to update: pass at least one field flag");
    }
    let channel = provider.update_channel(id, patch).await?;
    match format {
        OutputFormat::Json => output::print_one(&channel),
        OutputFormat::Text => {
            println!("✓ Updated channel {} (phase {})", channel.id, channel.phase);
            Ok(())
        }
    }
}

pub async fn delete(provider: &dyn DataProvider, id: &str) -> anyhow::Result<()> {
    provider.delete_channel(id).await?;
    println!("✓ Deleted channel {id}");
    Ok(())
}
