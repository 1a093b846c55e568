// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Login, signup, logout, whoami.

use clap::Args;
use colored::Colorize;
use hearth_client::{GuardRequirement, SignupRequest};
use hearth_core::HearthError;

use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email.
    #[arg(long)]
    pub email: String,
}

#[derive(Args, Debug)]
pub struct SignupArgs {
    /// Display name.
    #[arg(long)]
    pub name: String,
    /// Account email.
    #[arg(long)]
    pub email: String,
}

pub async fn login(ctx: &AppContext, args: LoginArgs) -> Result<(), HearthError> {
    let password = prompt_password("Password: ")?;
    let user = ctx.session.login(&args.email, &password).await?;
    println!(
        "{} logged in as {} ({})",
        "ok:".green().bold(),
        user.name,
        user.role
    );
    Ok(())
}

pub async fn signup(ctx: &AppContext, args: SignupArgs) -> Result<(), HearthError> {
    let password = prompt_password("Password: ")?;
    let password_confirm = prompt_password("Confirm password: ")?;
    // Caught locally; never sent to the server.
    if password != password_confirm {
        return Err(HearthError::api("Passwords do not match.", 400));
    }

    let user = ctx
        .session
        .signup(&SignupRequest {
            name: args.name,
            email: args.email,
            password,
            password_confirm,
        })
        .await?;
    println!("{} welcome, {}", "ok:".green().bold(), user.name);
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<(), HearthError> {
    // Cleared locally right away; the server-side invalidation gets a
    // bounded window before the process exits, and its failure is not ours.
    let reconciliation = ctx.session.logout().await;
    println!("{} logged out", "ok:".green().bold());
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), reconciliation).await;
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Result<(), HearthError> {
    let user = ctx.authorize(GuardRequirement::authenticated()).await?;
    println!("{}  {}  role: {}", user.name.bold(), user.email, user.role);
    if let Some(status) = user.agent_status {
        println!("agent application: {status}");
    }
    Ok(())
}

fn prompt_password(prompt: &str) -> Result<String, HearthError> {
    rpassword::prompt_password(prompt)
        .map_err(|e| HearthError::Internal(format!("cannot read password: {e}")))
}
