//! List projects command handler

use std::collections::HashMap;

use crate::config::Config;
use crate::db::Store;
use crate::entities::TaskStatus;

pub async fn cmd_list_projects(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let projects = store.list_projects().await?;

    if projects.is_empty() {
        println!("No projects yet.");
        return Ok(());
    }

    let ids: Vec<i32> = projects.iter().map(|p| p.id).collect();
    let tasks = store.get_tasks_for_projects(&ids).await?;

    // project id -> (total, done)
    let mut counts: HashMap<i32, (usize, usize)> = HashMap::new();
    for task in &tasks {
        let entry = counts.entry(task.project_id).or_default();
        entry.0 += 1;
        if task.status == TaskStatus::Done {
            entry.1 += 1;
        }
    }

    println!("Projects ({} total)", projects.len());
    println!("{:-<70}", "");

    for project in projects {
        let (total, done) = counts.get(&project.id).copied().unwrap_or_default();
        println!("{:>5}  {} [{}/{} done]", project.id, project.title, done, total);
        if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
            println!("       {description}");
        }
    }

    Ok(())
}
