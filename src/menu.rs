//! Interactive cluster and task selection menus.
//!
//! Both menus print a sorted, numbered list and block on one line of
//! stdin for the selection. Parsing and bounds checking live in
//! [`parse_choice`] so the decision is testable without a terminal.

use anyhow::{bail, Context, Result};
use std::io::Write;

use crate::aws::EcsClient;
use crate::theme::Theme;

/// Parses a menu selection against the number of entries shown.
pub fn parse_choice(input: &str, len: usize) -> Result<usize> {
    let index: usize = input
        .trim()
        .parse()
        .with_context(|| format!("not a number: {:?}", input.trim()))?;
    if index >= len {
        bail!("invalid index: {index}");
    }
    Ok(index)
}

/// Prompts for a selection and reads one line from stdin.
fn prompt_choice(len: usize, theme: &Theme) -> Result<usize> {
    print!("{}", theme.paint("Enter a number > ", theme.accent));
    std::io::stdout().flush()?;

    let mut line = String::new();
    let read = std::io::stdin()
        .read_line(&mut line)
        .context("reading menu selection")?;
    if read == 0 {
        bail!("input closed before a selection was made");
    }
    parse_choice(&line, len)
}

/// Lists every cluster and asks the operator to pick one.
///
/// # Errors
/// This function will return an error if the cluster listing fails, the
/// account has no clusters (a not-found condition, not an empty success),
/// or the selection is invalid.
pub async fn choose_cluster(client: &EcsClient, theme: &Theme) -> Result<String> {
    println!("{}", theme.paint("Listing ECS clusters...", theme.muted));

    let mut clusters = client.list_clusters().await?;
    clusters.sort();
    if clusters.is_empty() {
        bail!("no ECS clusters found");
    }

    println!("{}", theme.paint("Select a cluster:", theme.accent));
    for (i, cluster) in clusters.iter().enumerate() {
        println!("{} {cluster}", theme.paint(&format!("[{i}]"), theme.accent));
    }

    let index = prompt_choice(clusters.len(), theme)?;
    let chosen = clusters.swap_remove(index);
    println!(
        "{}",
        theme.paint(&format!("You chose: {chosen}"), theme.notice)
    );
    Ok(chosen)
}

/// Lists the cluster's tasks across every status and asks the operator to
/// pick one. Returns the chosen task's full ARN.
///
/// # Errors
/// This function will return an error if the task listing fails, the
/// cluster has no tasks in any status, or the selection is invalid.
pub async fn choose_task(client: &EcsClient, cluster: &str, theme: &Theme) -> Result<String> {
    println!(
        "{}",
        theme.paint(&format!("Listing tasks in cluster {cluster}..."), theme.muted)
    );

    let tasks = client.list_tasks(cluster).await?;
    if tasks.is_empty() {
        bail!("no tasks found in cluster {cluster}");
    }

    println!("{}", theme.paint("Select a task:", theme.accent));
    for (i, task) in tasks.iter().enumerate() {
        println!(
            "{} {}: {} ({})",
            theme.paint(&format!("[{i}]"), theme.accent),
            task.task_id,
            task.task_definition,
            task.status
        );
    }

    let index = prompt_choice(tasks.len(), theme)?;
    let chosen = &tasks[index];
    println!(
        "{}",
        theme.paint(&format!("You chose task: {}", chosen.task_id), theme.notice)
    );
    Ok(chosen.task_arn.clone())
}
