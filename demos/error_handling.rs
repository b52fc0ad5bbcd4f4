use dscc_rs::{Dscc, DsccError, ErrorKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A client without a token or credentials fails before touching the network
    let anonymous = Dscc::with_config(dscc_rs::ClientConfig::new("https://eu1.data.cloud.hpe.com"))?;
    match anonymous.audit().issues().await {
        Err(DsccError::MissingCredentials { .. }) => println!("no credentials configured, as expected"),
        other => println!("unexpected: {:?}", other),
    }

    // Invalid identifiers are rejected locally
    if let Err(e) = anonymous.alletra6k("bad/id") {
        println!("rejected system id: {}", e);
    }

    let dscc = dscc_rs::from_env()?;
    match dscc.storage_systems().get("does-not-exist").await {
        Ok(system) => println!("found: {}", system),
        Err(e) => match e.kind() {
            ErrorKind::Authentication => println!("check DSCC_CLIENT_ID / DSCC_CLIENT_SECRET: {}", e),
            ErrorKind::Remote => match &e {
                DsccError::RateLimited { retry_after, .. } => {
                    println!("rate limited, retry after {:?}", retry_after)
                }
                _ => println!("service answered {:?}: {}", e.status(), e),
            },
            ErrorKind::Transport => println!("network problem: {}", e),
            ErrorKind::Parse => println!("unexpected response: {}", e),
            ErrorKind::Validation => println!("bad input: {}", e),
        },
    }

    Ok(())
}
