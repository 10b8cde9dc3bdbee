//! Show command

use clap::Args;

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub username: String,
}

pub async fn run(args: ShowArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    super::require_persistent_backend(&config, "show")?;

    let service = crate::create_user_service(&config).await?;

    let user = service.require_by_username(&args.username).await?;

    let mut profile = serde_json::to_value(&user)?;
    profile["password_algorithm"] = match user.tagged_password() {
        Some(tag) => serde_json::Value::String(tag.algorithm().name().to_string()),
        None => serde_json::Value::Null,
    };

    println!("{}", serde_json::to_string_pretty(&profile)?);

    Ok(())
}
