use travel_quote::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    travel_quote::serve(config).await?;
    Ok(())
}
