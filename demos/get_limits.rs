use pushover::{Credentials, PushoverClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = PushoverClient::new(Credentials::from_env()?);

    let limits = client.get_limits().await?.into_result()?;
    println!(
        "limit: {:?}, remaining: {:?}, reset: {:?}",
        limits.limit, limits.remaining, limits.reset
    );

    Ok(())
}
