use dscc_rs::{utils, ClientConfig, Dscc, ListParams};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::var("DSCC_URL").unwrap_or_else(|_| "https://eu1.data.cloud.hpe.com".to_string());
    let client_id = std::env::var("DSCC_CLIENT_ID")?;
    let client_secret = std::env::var("DSCC_CLIENT_SECRET")?;

    let config = ClientConfig::new(base_url)
        .with_credentials(client_id, client_secret)
        .with_timeout(Duration::from_secs(30));
    let dscc = Dscc::with_config(config)?;

    // Authenticate up front so credential problems surface before any query
    let token = dscc.authenticate().await?;
    println!("token valid for {:?}", token.expires_in);

    let params = ListParams::new()
        .filter("occurredAt gt 2024-01-01T00:00:00Z")
        .sort("occurredAt desc")
        .limit(20);
    let events = dscc.audit().audit_events_with(&params).await?;

    for event in utils::items(&events) {
        println!(
            "{} {} {}",
            event["occurredAt"].as_str().unwrap_or("-"),
            event["code"].as_str().unwrap_or("-"),
            event["message"].as_str().unwrap_or("")
        );
    }

    let issues = dscc.audit().issues().await?;
    println!("\nopen issues: {}", utils::items(&issues).len());

    Ok(())
}
