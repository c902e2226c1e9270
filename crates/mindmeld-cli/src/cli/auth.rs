//! Account CLI subcommands.
//!
//! Sign in, sign up, sign out, and identity display. All of these need a
//! `[remote]` section in config.toml; without one the device stays
//! anonymous and sessions are local-only.

use anyhow::{Result, bail};
use clap::Subcommand;
use console::style;
use dialoguer::Password;

use mindmeld_infra::auth::AuthService;

use crate::state::AppState;

/// Account subcommands.
#[derive(Subcommand)]
pub enum AuthCommand {
    /// Sign in with email and password.
    Login {
        /// Account email.
        email: String,

        /// Password (prompted securely if omitted).
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and sign in.
    Signup {
        /// Account email.
        email: String,

        /// Password (prompted securely if omitted).
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and forget cached credentials.
    Logout,

    /// Show the current identity.
    Whoami,
}

/// Handle an auth subcommand.
pub async fn handle(cmd: AuthCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        AuthCommand::Login { email, password } => {
            let auth = require_auth(state)?;
            let password = read_password(password)?;
            let session = auth.login(&email, &password).await?;
            if json {
                println!(
                    "{}",
                    serde_json::json!({"email": session.email, "user_id": session.user_id})
                );
            } else {
                println!(
                    "  {} Signed in as {}",
                    style("ok").green(),
                    style(&session.email).cyan()
                );
            }
            Ok(())
        }

        AuthCommand::Signup { email, password } => {
            let auth = require_auth(state)?;
            let password = read_password(password)?;
            let session = auth.signup(&email, &password).await?;
            if json {
                println!(
                    "{}",
                    serde_json::json!({"email": session.email, "user_id": session.user_id})
                );
            } else {
                println!(
                    "  {} Account created; signed in as {}",
                    style("ok").green(),
                    style(&session.email).cyan()
                );
            }
            Ok(())
        }

        AuthCommand::Logout => {
            let auth = require_auth(state)?;
            auth.logout().await?;
            if json {
                println!("{}", serde_json::json!({"signed_out": true}));
            } else {
                println!("  {} Signed out.", style("ok").green());
            }
            Ok(())
        }

        AuthCommand::Whoami => {
            if json {
                println!("{}", serde_json::to_string_pretty(&state.identity)?);
                return Ok(());
            }
            match &state.identity.email {
                Some(email) => {
                    println!(
                        "  {} ({})",
                        style(email).cyan(),
                        style(state.identity.id).dim()
                    );
                }
                None => {
                    println!(
                        "  {} anonymous device ({})",
                        style("i").blue().bold(),
                        style(state.identity.id).dim()
                    );
                }
            }
            Ok(())
        }
    }
}

fn require_auth(state: &AppState) -> Result<&AuthService> {
    match &state.auth {
        Some(auth) => Ok(auth),
        None => bail!("accounts need a [remote] section in config.toml"),
    }
}

fn read_password(provided: Option<String>) -> Result<String> {
    match provided {
        Some(p) => Ok(p),
        None => Ok(Password::new().with_prompt("Password").interact()?),
    }
}
