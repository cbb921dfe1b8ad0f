use bitflyer::exchanges::bitflyer::{BitflyerBuilder, Page};
use bitflyer::ExchangeConfig;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Public endpoints need no credentials; private ones are skipped without them
    #[cfg(feature = "env-file")]
    let config = ExchangeConfig::from_env_file("BITFLYER");
    #[cfg(not(feature = "env-file"))]
    let config = ExchangeConfig::from_env("BITFLYER");
    let config = config.unwrap_or_else(|_| ExchangeConfig::read_only());
    let has_credentials = config.has_credentials();
    let client = BitflyerBuilder::new().with_config(config).build()?;

    println!("Fetching markets...");
    let markets = client.market.get_markets().await?;
    for market in markets.iter().take(5) {
        println!(
            "Market: {} ({})",
            market.product_code,
            market.alias.as_deref().unwrap_or("-")
        );
    }

    let ticker = bitflyer::core::kernel::with_timeout(
        Duration::from_secs(10),
        client.market.get_ticker("BTC_JPY"),
    )
    .await?;
    println!(
        "BTC_JPY bid {} / ask {} (ltp {})",
        ticker.best_bid, ticker.best_ask, ticker.ltp
    );

    let executions = client
        .market
        .get_executions("BTC_JPY", Page::new().count(5))
        .await?;
    for execution in &executions {
        println!(
            "{} {} {} @ {}",
            execution.exec_date, execution.side, execution.size, execution.price
        );
    }

    if has_credentials {
        for balance in client.account.get_balance().await? {
            println!(
                "{}: {} (available {})",
                balance.currency_code, balance.amount, balance.available
            );
        }
    }

    Ok(())
}
