//! Register command

use clap::Args;

use crate::domain::user::User;

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Unique login name
    #[arg(long)]
    pub username: String,

    /// Plaintext password; encoded before it is stored
    #[arg(long, env = "BACKOFFICE_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long)]
    pub display_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,
}

impl RegisterArgs {
    fn into_user(self) -> User {
        let mut user = User::new(self.username, self.password);

        if let Some(display_name) = self.display_name {
            user = user.with_display_name(display_name);
        }

        if let Some(email) = self.email {
            user = user.with_email(email);
        }

        user
    }
}

pub async fn run(args: RegisterArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let service = crate::create_user_service(&config).await?;

    let user = service.insert(args.into_user()).await?;
    let algorithm = user
        .tagged_password()
        .map(|tag| tag.algorithm().name())
        .unwrap_or("unknown");

    println!("Registered '{}' ({}) using {}", user.username(), user.id(), algorithm);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_user() {
        let args = RegisterArgs {
            username: "alice".to_string(),
            password: "secret123".to_string(),
            display_name: Some("Alice".to_string()),
            email: None,
        };

        let user = args.into_user();
        assert_eq!(user.username(), "alice");
        assert_eq!(user.password(), "secret123");
        assert_eq!(user.display_name(), Some("Alice"));
        assert!(user.email().is_none());
    }
}
