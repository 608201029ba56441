//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `tabtodo_core` linkage without the Flutter host.
//! - Print the active and archive views of a storage file when one is given.
//!
//! Usage: `tabtodo [STORAGE_PATH]`

use std::process::ExitCode;
use tabtodo_core::db::open_db;
use tabtodo_core::{ActiveGroupsService, ArchiveService, Group, KvGroupRepository, SqliteKvStore};

fn main() -> ExitCode {
    println!("tabtodo_core ping={}", tabtodo_core::ping());
    println!("tabtodo_core version={}", tabtodo_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let conn = match open_db(&path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open storage `{path}`: {err}");
            return ExitCode::FAILURE;
        }
    };
    let store = SqliteKvStore::new(&conn);

    let active = ActiveGroupsService::mount(KvGroupRepository::new(&store));
    print_section("active", &active.active_groups());

    let archive = ArchiveService::mount(KvGroupRepository::new(&store));
    print_section("archive", &archive.completed_groups());

    ExitCode::SUCCESS
}

fn print_section(title: &str, groups: &[&Group]) {
    println!("[{title}] {} group(s)", groups.len());
    for group in groups {
        println!(
            "  {} ({} remaining of {})",
            group.name,
            group.remaining_count(),
            group.task_count()
        );
        for task in group.preview_tasks() {
            let mark = if task.completed { "x" } else { " " };
            println!("    [{mark}] {}", task.title);
        }
        if group.hidden_task_count() > 0 {
            println!(
                "    showing {} of {} tasks",
                group.preview_tasks().len(),
                group.task_count()
            );
        }
    }
}
