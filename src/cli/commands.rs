//! Command execution for the Blueprint CLI.
//!
//! Each screen command mounts its aggregator, waits for the first load and
//! prints one summary. Protected commands run the auth gate first.

use std::io::Write;
use std::sync::Arc;

use color_eyre::Result;

use crate::adapters::ConsoleNavigator;
use crate::api::StudiosParams;
use crate::auth::{AuthGate, GateState, SessionStore, SIGN_IN_ROUTE};
use crate::config::ClientConfig;
use crate::error::ErrorShape;
use crate::query::LifecycleEvents;
use crate::screens::{
    CreatePost, CreateStudio, DashboardData, DisplayContent, HomeData, MutationOutcome,
    StudiosData,
};
use crate::traits::BlueprintApi;

use super::args::{CliCommand, USAGE};
use super::version::version_line;

pub const EXIT_OK: i32 = 0;
/// A screen loaded with errors, or a create call failed.
pub const EXIT_FAILURE: i32 = 1;
/// The auth gate redirected to sign-in.
pub const EXIT_REDIRECT: i32 = 2;

/// Everything a command needs, built once by the binary.
pub struct CliContext {
    pub config: ClientConfig,
    pub store: SessionStore,
    pub api: Arc<dyn BlueprintApi>,
    pub events: LifecycleEvents,
}

/// Run `command`, writing human-readable output to `out`. Returns the
/// process exit code.
pub async fn run_command(
    command: CliCommand,
    ctx: &CliContext,
    out: &mut dyn Write,
) -> Result<i32> {
    if command.is_protected() && !authorize(ctx, out).await? {
        return Ok(EXIT_REDIRECT);
    }

    match command {
        CliCommand::Version => {
            writeln!(out, "{}", version_line())?;
            Ok(EXIT_OK)
        }
        CliCommand::Help => {
            writeln!(out, "{}", USAGE)?;
            Ok(EXIT_OK)
        }
        CliCommand::Home => show_home(ctx, out).await,
        CliCommand::Dashboard { filter } => {
            let dashboard = DashboardData::new(ctx.api.clone(), &ctx.events).with_filter(filter);
            dashboard.settled().await;
            let view = dashboard.view();

            writeln!(out, "Dashboard ({})", view.active_filter)?;
            match &view.display_content {
                DisplayContent::Feed(items) => {
                    for item in items {
                        writeln!(out, "  {}", item.title.as_deref().unwrap_or(&item.id))?;
                    }
                }
                DisplayContent::Posts(posts) => {
                    for post in posts {
                        writeln!(out, "  {}", post.title.as_deref().unwrap_or(&post.content))?;
                    }
                }
            }
            if view.is_empty {
                writeln!(out, "  Nothing here yet.")?;
            }
            writeln!(out, "Studios: {}", view.studios.len())?;

            report_errors(
                out,
                &[
                    ("feed", &view.errors.feed),
                    ("posts", &view.errors.posts),
                    ("studios", &view.errors.studios),
                ],
            )
        }
        CliCommand::Studios { search, sort, page } => {
            let params = StudiosParams {
                page,
                search,
                sort,
                ..StudiosParams::default()
            };
            let studios = StudiosData::with_params(ctx.api.clone(), &ctx.events, params);
            studios.settled().await;
            let view = studios.view();

            writeln!(
                out,
                "Studios, page {} of {} (sort: {})",
                view.current_page, view.total_pages, view.sort_by
            )?;
            for studio in &view.studios {
                writeln!(out, "  {} ({} members)", studio.name, studio.member_count)?;
            }
            if view.is_empty {
                writeln!(out, "  No studios found.")?;
            }
            report_errors(out, &[("studios", &view.error)])
        }
        CliCommand::Post(input) => {
            let outcome = CreatePost::new(ctx.api.clone()).create_post(input).await;
            report_outcome(out, outcome, |post| format!("Created post {}", post.id))
        }
        CliCommand::Studio(input) => {
            let outcome = CreateStudio::new(ctx.api.clone()).create_studio(input).await;
            report_outcome(out, outcome, |studio| {
                format!("Created studio {} ({})", studio.name, studio.id)
            })
        }
        CliCommand::Login { token, user } => {
            ctx.store.login(token, user.clone())?;
            writeln!(out, "Signed in as {}", user.username)?;
            Ok(EXIT_OK)
        }
        CliCommand::Logout => {
            ctx.store.logout()?;
            writeln!(out, "Signed out")?;
            Ok(EXIT_OK)
        }
    }
}

async fn authorize(ctx: &CliContext, out: &mut dyn Write) -> Result<bool> {
    let navigator = Arc::new(ConsoleNavigator::new());
    let gate = AuthGate::new(ctx.store.clone(), navigator.clone())
        .with_grace(ctx.config.auth_grace);

    if gate.mount().await == GateState::Authorized {
        return Ok(true);
    }
    let route = navigator
        .redirected_to()
        .unwrap_or_else(|| SIGN_IN_ROUTE.to_string());
    writeln!(out, "Sign in required: {}", route)?;
    Ok(false)
}

async fn show_home(ctx: &CliContext, out: &mut dyn Write) -> Result<i32> {
    let home = HomeData::new(ctx.api.clone(), &ctx.events);
    home.settled().await;
    let view = home.view();

    writeln!(out, "Trending")?;
    for item in &view.trending {
        writeln!(out, "  {}", item.title.as_deref().unwrap_or(&item.id))?;
    }
    writeln!(out, "Projects")?;
    for project in &view.projects {
        writeln!(out, "  {}", project.title)?;
    }
    writeln!(out, "Studios")?;
    for studio in &view.studios {
        writeln!(out, "  {}", studio.name)?;
    }
    if view.is_empty {
        writeln!(out, "Nothing to show yet.")?;
    }

    report_errors(
        out,
        &[
            ("trending", &view.errors.trending),
            ("projects", &view.errors.projects),
            ("studios", &view.errors.studios),
        ],
    )
}

fn report_errors(out: &mut dyn Write, errors: &[(&str, &Option<ErrorShape>)]) -> Result<i32> {
    let mut code = EXIT_OK;
    for (name, error) in errors {
        if let Some(error) = error {
            let hint = error.category().recovery_hint();
            writeln!(out, "Failed to load {}: {} ({})", name, error.user_message(), hint)?;
            code = EXIT_FAILURE;
        }
    }
    Ok(code)
}

fn report_outcome<T>(
    out: &mut dyn Write,
    outcome: MutationOutcome<T>,
    describe: impl FnOnce(&T) -> String,
) -> Result<i32> {
    match outcome {
        MutationOutcome::Success { data } => {
            writeln!(out, "{}", describe(&data))?;
            Ok(EXIT_OK)
        }
        MutationOutcome::Failure { error } => {
            writeln!(out, "Error: {}", error)?;
            Ok(EXIT_FAILURE)
        }
    }
}
