use pushover::{
    Attachment, Credentials, Message, MessageOptions, MessageText, Priority, PushoverClient, Title,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = std::env::var("PUSHOVER_MESSAGE")
        .unwrap_or_else(|_| "Hello from the pushover demo.".to_owned());
    let priority = std::env::var("PUSHOVER_PRIORITY")
        .ok()
        .map(|raw| raw.trim().parse::<i8>())
        .transpose()?
        .map(Priority::try_from)
        .transpose()?
        .unwrap_or_default();
    let attachment = std::env::var("PUSHOVER_ATTACHMENT")
        .ok()
        .map(Attachment::from_path)
        .transpose()?;

    let client = PushoverClient::new(Credentials::from_env()?);
    let message = Message::new(
        MessageText::new(text)?,
        MessageOptions {
            title: Some(Title::new("pushover demo")?),
            attachment,
            priority,
            ..Default::default()
        },
    );

    let response = client.send(message).await?;
    println!(
        "http: {}, status: {:?}, receipt: {:?}, limits: {:?}, errors: {:?}",
        response.http_status,
        response.data.status,
        response.data.receipt,
        response.data.app_limits,
        response.data.errors
    );

    Ok(())
}
