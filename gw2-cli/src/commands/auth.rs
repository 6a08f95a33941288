//! Authentication commands.
//!
//! Sessions are local: login mints a user id derived from the email so
//! the same account keeps its favorites across sign-ins, and guest mode
//! gets a throwaway id. There is no remote identity provider.

use clap::{Args, Subcommand};
use uuid::Uuid;

use gw2_core::{Session, SessionStore};

/// Session commands
#[derive(Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand)]
enum AuthSubcommand {
    /// Sign in with an email address
    Login {
        /// Email address
        #[arg(long, short)]
        email: String,
    },

    /// Continue as a guest
    Guest,

    /// Sign out and clear the stored session
    Logout,

    /// Show the current session
    Status,
}

/// Errors that can occur during authentication
#[derive(Debug)]
pub enum AuthError {
    InvalidEmail(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::InvalidEmail(email) => write!(f, "not a valid email address: {}", email),
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthCommand {
    pub fn run(&self, store: &SessionStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            AuthSubcommand::Login { email } => {
                let email = email.trim();
                if email.is_empty() || !email.contains('@') {
                    return Err(AuthError::InvalidEmail(email.to_string()).into());
                }

                let session = Session::account(user_id_for(email), email);
                store.save(&session)?;
                println!("Signed in as {} (user {}).", email, session.user_id);
            }

            AuthSubcommand::Guest => {
                let session = Session::guest();
                store.save(&session)?;
                println!("Browsing as guest ({}).", session.user_id);
            }

            AuthSubcommand::Logout => {
                store.clear()?;
                println!("Signed out.");
            }

            AuthSubcommand::Status => match store.load()? {
                Some(session) if session.guest => {
                    println!("Guest session ({}).", session.user_id);
                }
                Some(session) => {
                    println!(
                        "Signed in as {} (user {}).",
                        session.display_name(),
                        session.user_id
                    );
                }
                None => println!("Not signed in."),
            },
        }

        Ok(())
    }
}

/// Stable per-email user id, so favorites survive sign-out and sign-in.
fn user_id_for(email: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, email.to_lowercase().as_bytes()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_is_stable_and_case_insensitive() {
        assert_eq!(user_id_for("a@example.com"), user_id_for("A@Example.COM"));
        assert_ne!(user_id_for("a@example.com"), user_id_for("b@example.com"));
    }
}
