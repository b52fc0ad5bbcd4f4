use dscc_rs::{from_env, utils, ListParams};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // DSCC_URL, DSCC_CLIENT_ID and DSCC_CLIENT_SECRET must be set
    let dscc = from_env()?;

    let storage = dscc.storage_systems();
    let systems = storage
        .storage_systems_with(&ListParams::new().sort("name asc"))
        .await?;

    for system in utils::items(&systems) {
        println!(
            "{:<44} {:<24} {}",
            system["id"].as_str().unwrap_or("-"),
            system["name"].as_str().unwrap_or("-"),
            system["model"].as_str().unwrap_or("-")
        );
    }

    // Drill into the first Alletra 9000, if any
    let primera = storage.alletra9k_systems().await?;
    if let Some(id) = utils::items(&primera).first().and_then(|s| s["id"].as_str()) {
        let system = dscc.alletra9k(id)?;
        let capacity = system.capacity_summary().await?;
        println!("\ncapacity of {}:\n{}", id, serde_json::to_string_pretty(&capacity)?);

        let pools = system.storage_pools().await?;
        if let Some(pool) = utils::find_by_key(utils::items(&pools), "name", "SSD_r6") {
            println!("SSD_r6 pool id: {}", pool["id"]);
        }
    }

    Ok(())
}
