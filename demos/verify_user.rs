use pushover::{Credentials, DeviceName, PushoverClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = PushoverClient::new(Credentials::from_env()?);

    let response = match std::env::var("PUSHOVER_DEVICE") {
        Ok(device) => client.verify_device(&DeviceName::new(device)?).await?,
        Err(_) => client.verify_user().await?,
    };
    println!(
        "valid: {}, group: {}, devices: {:?}, errors: {:?}",
        response.is_success(),
        response.data.group,
        response.data.devices,
        response.data.errors
    );

    Ok(())
}
