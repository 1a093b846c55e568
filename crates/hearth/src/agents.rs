// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent application subcommands: apply as a user, review as an admin.
//!
//! The review queue is the one admin-only surface in the CLI, so it sits
//! behind the exact-role guard (agents do not see it; neither would an
//! admin see an agent-only surface).

use clap::{Args, Subcommand};
use colored::Colorize;
use hearth_client::GuardRequirement;
use hearth_core::models::AgentApplication;
use hearth_core::types::{AgentStatus, Role, UserId};
use hearth_core::HearthError;

use crate::context::AppContext;

#[derive(Subcommand, Debug)]
pub enum AgentCommand {
    /// Apply to become an agent.
    Apply(ApplyArgs),
    /// List applications awaiting review (admins).
    Pending,
    /// Approve an application (admins).
    Approve { user: String },
    /// Reject an application (admins).
    Reject { user: String },
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    #[arg(long)]
    pub agency: String,
    #[arg(long)]
    pub specialization: String,
    #[arg(long)]
    pub bio: String,
    #[arg(long)]
    pub phone: String,
}

pub async fn run(ctx: &AppContext, cmd: AgentCommand) -> Result<(), HearthError> {
    match cmd {
        AgentCommand::Apply(args) => {
            let user = ctx.authorize(GuardRequirement::role(Role::User)).await?;
            // One outstanding application at a time; rejected may reapply.
            if user.agent_status == Some(AgentStatus::Pending) {
                return Err(HearthError::api(
                    "You already have an application under review.",
                    409,
                ));
            }
            let updated = ctx
                .agents
                .apply(&AgentApplication {
                    agency: args.agency,
                    specialization: args.specialization,
                    bio: args.bio,
                    phone: args.phone,
                })
                .await?;
            // The session's agent_status changed server-side; refresh so
            // subsequent views see it.
            ctx.session.refresh().await?;
            println!(
                "{} application submitted (status: {})",
                "ok:".green().bold(),
                updated
                    .agent_status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "pending".into())
            );
        }
        AgentCommand::Pending => {
            ctx.authorize(GuardRequirement::role(Role::Admin)).await?;
            let applications = ctx.agents.pending().await?;
            if applications.is_empty() {
                println!("no pending applications");
                return Ok(());
            }
            for application in &applications {
                let mut line = format!(
                    "{}  {}  {}",
                    application.id.0.bold(),
                    application.name,
                    application.email
                );
                if let Some(details) = &application.application {
                    line.push_str(&format!(
                        "  {} / {}",
                        details.agency, details.specialization
                    ));
                }
                println!("{line}");
            }
        }
        AgentCommand::Approve { user } => {
            ctx.authorize(GuardRequirement::role(Role::Admin)).await?;
            ctx.agents.approve(&UserId(user)).await?;
            println!("{} application approved; the user is now an agent", "ok:".green().bold());
        }
        AgentCommand::Reject { user } => {
            ctx.authorize(GuardRequirement::role(Role::Admin)).await?;
            ctx.agents.reject(&UserId(user)).await?;
            println!("{} application rejected; the user may reapply", "ok:".green().bold());
        }
    }
    Ok(())
}
