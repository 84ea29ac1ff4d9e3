use std::io;

use pushover::{Credentials, PushoverClient, Receipt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let receipt = std::env::var("PUSHOVER_RECEIPT").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "PUSHOVER_RECEIPT environment variable is required",
        )
    })?;

    let client = PushoverClient::new(Credentials::from_env()?);
    let response = client.get_receipt(&Receipt::new(receipt)?).await?;
    println!(
        "acknowledged: {}, by: {:?}, expired: {}, expires_at: {:?}",
        response.data.acknowledged,
        response.data.acknowledged_by,
        response.data.expired,
        response.data.expires_at
    );

    Ok(())
}
