//! ecs-trace - Browse an ECS task's recent history in one timeline
//!
//! Merges two independent event sources for a single running or stopped
//! task (the service's lifecycle events, and each container's CloudWatch
//! Logs stream) into one chronologically ordered timeline, presented in
//! a terminal-size-aware pager or as a flat listing. Cluster and task can
//! be passed as flags or chosen from interactive menus.

mod aws;
mod config;
mod fetch;
mod menu;
mod pager;
mod theme;
mod timeline;
mod trace;

use anyhow::Result;
use clap::Parser;
use crossterm::tty::IsTty;

use aws::EcsClient;
use config::Config;
use theme::Theme;
use trace::TaskTracer;

/// Merge an ECS task's service events and container logs into a single
/// browsable timeline.
#[derive(Debug, Parser)]
#[command(name = "ecs-trace", version)]
struct Cli {
    /// AWS profile from ~/.aws/credentials (overrides the config file)
    #[arg(long)]
    profile: Option<String>,

    /// AWS region (overrides the config file)
    #[arg(long)]
    region: Option<String>,

    /// ECS cluster name or ARN; chosen interactively if omitted
    #[arg(long)]
    cluster: Option<String>,

    /// ECS task ID or ARN; chosen interactively if omitted
    #[arg(long)]
    task: Option<String>,

    /// Print the timeline oldest-first without the interactive pager
    #[arg(long)]
    plain: bool,
}

/// Application entry point.
///
/// Loads configuration, resolves AWS settings (flags win over the config
/// file), discovers the cluster and task interactively when they were not
/// passed as flags, runs the trace, and hands the populated timeline to
/// the chosen presentation mode.
///
/// # Errors
/// This function will return an error if:
/// - Configuration cannot be loaded or parsed
/// - AWS client initialization fails
/// - Discovery fails (no clusters/tasks, task not found)
/// - The trace cannot describe the task or its definition
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    // Styling off when output is piped, so escapes never leak into files
    let interactive = std::io::stdout().is_tty();
    let theme = Theme::from_config(&config.ui.theme, &config.ui.colors, interactive);

    let region = cli.region.or(config.aws.region);
    let profile = cli.profile.or(config.aws.profile);
    let client = EcsClient::new(region, profile).await?;

    let cluster = match cli.cluster {
        Some(cluster) => cluster,
        None => menu::choose_cluster(&client, &theme).await?,
    };
    let task = match cli.task {
        Some(task) => task,
        None => menu::choose_task(&client, &cluster, &theme).await?,
    };

    let tracer = TaskTracer::new(&client, cluster);
    let mut timeline = tracer.trace(&task, &theme).await?;

    if cli.plain || !interactive {
        pager::print_flat(&mut timeline, &theme, &mut std::io::stdout())?;
    } else {
        pager::run(&mut timeline, &theme)?;
    }

    Ok(())
}
