use crate::board::Columns;
use crate::models::{Profile, Project, ProjectCounts, TeamMember};
use crate::repo::TaskCounts;

pub fn print_project(p: &Project) {
    println!("Project: {} (#{})", p.name, p.id);
    if let Some(ref desc) = p.description {
        println!("  Description: {desc}");
    }
    println!("  Status: {}", p.status.label());
    if !p.created_at.is_empty() {
        println!("  Created: {}", p.created_at);
    }
}

pub fn print_project_list(projects: &[Project], active_id: Option<i64>) {
    if projects.is_empty() {
        println!("No projects yet. Create one with `taskboard project create <name>`.");
        return;
    }
    for p in projects {
        let marker = if Some(p.id) == active_id { " *" } else { "" };
        println!(
            "  #{} {} [{}] - {}{}",
            p.id,
            p.name,
            p.status.label(),
            p.description.as_deref().unwrap_or("No description"),
            marker
        );
    }
}

pub fn print_project_counts(c: &ProjectCounts) {
    println!("Projects: {}", c.total);
    println!(
        "  pending={} active={} paused={} finished={}",
        c.pending, c.active, c.paused, c.finished
    );
}

pub fn print_task_counts(c: &TaskCounts) {
    if c.total == 0 {
        return;
    }
    println!("Progress: {:.1}% ({}/{})", c.percentage, c.done, c.total);
    println!(
        "  todo={} doing={} paused={} done={}",
        c.todo, c.doing, c.paused, c.done
    );
}

pub fn print_board(columns: &Columns, initials: &str) {
    for column in columns.iter() {
        println!("\n{} ({})", column.title, column.len());
        if column.is_empty() {
            println!("  -");
        }
        for item in &column.items {
            println!("  #{} [{}] {} ({})", item.id, item.tag, item.content, initials);
        }
    }
}

pub fn print_member_list(members: &[TeamMember]) {
    if members.is_empty() {
        println!("No team members.");
        return;
    }
    for m in members {
        println!(
            "  #{} [{}] {} <{}> - {}{}",
            m.id,
            m.initials(),
            m.name,
            m.email,
            m.role,
            if m.is_admin { " (admin)" } else { "" }
        );
    }
}

pub fn print_profile(p: &Profile) {
    let name = p.full_name();
    println!("Name: {}", if name.is_empty() { "-" } else { name.as_str() });
    println!("Email: {}", p.email.as_deref().unwrap_or("-"));
    println!("Initials: {}", p.initials());
}
