use pushover::{Credentials, Glance, GlanceOptions, GlanceText, Percent, PushoverClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let percent = std::env::var("PUSHOVER_PERCENT")
        .ok()
        .map(|raw| raw.trim().parse::<i64>())
        .transpose()?
        .map(Percent::new)
        .transpose()?;

    let client = PushoverClient::new(Credentials::from_env()?);
    let glance = Glance::new(GlanceOptions {
        title: Some(GlanceText::new("Demo")?),
        text: Some(GlanceText::new("Updated from the pushover demo")?),
        percent,
        ..Default::default()
    })?;

    let response = client.send(glance).await?;
    println!(
        "http: {}, status: {:?}, errors: {:?}",
        response.http_status, response.data.status, response.data.errors
    );

    Ok(())
}
