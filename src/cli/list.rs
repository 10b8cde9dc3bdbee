//! List command

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    super::require_persistent_backend(&config, "list")?;

    let service = crate::create_user_service(&config).await?;

    let users = service.list().await?;

    println!("{}", serde_json::to_string_pretty(&users)?);

    Ok(())
}
