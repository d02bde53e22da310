use super::date_status::DateStatus;
use super::task::{Category, Project, Task};
use super::view_model::DisplayTask;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(rows: &[DisplayTask<'_>]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "✓", "TITLE", "PRIORITY", "DUE", "STATUS", "CATEGORY", "PROJECT"]);
        for item in rows {
            let task = item.task;
            let project = item.project.map(|project| project.name.as_str()).unwrap_or("");
            table.add_row(row![
                task.id,
                Self::check(task.completed),
                task.title,
                task.priority,
                Self::due(task),
                Self::status(item.date_status, task.completed),
                task.category,
                project
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn task(row: &DisplayTask<'_>) -> Result<()> {
        let task = row.task;
        let completed = if task.completed { "yes" } else { "no" };
        let project = match (row.project, task.project_id) {
            (Some(project), _) => project.name.clone(),
            (None, Some(id)) => format!("#{} (missing)", id),
            (None, None) => String::new(),
        };
        let mut table = Table::new();

        table.add_row(row!["Title", task.title]);
        table.add_row(row!["Description", task.description]);
        table.add_row(row!["Priority", task.priority]);
        table.add_row(row!["Due", Self::due(task)]);
        table.add_row(row!["Status", Self::status(row.date_status, task.completed)]);
        table.add_row(row!["Completed", completed]);
        table.add_row(row!["Category", task.category]);
        table.add_row(row!["Project", project]);
        table.add_row(row!["Created", task.created_at.format("%Y-%m-%d %H:%M")]);
        table.add_row(row!["Updated", task.updated_at.format("%Y-%m-%d %H:%M")]);
        table.printstd();

        Ok(())
    }

    pub fn projects(projects: &[Project], tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "DESCRIPTION", "COLOR", "TASKS", "CREATED"]);
        for project in projects {
            let count = tasks.iter().filter(|task| task.project_id == Some(project.id)).count();
            table.add_row(row![
                project.id,
                project.name,
                project.description,
                project.color,
                count,
                project.created_at.format("%Y-%m-%d")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn categories(categories: &[Category]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "COLOR"]);
        for category in categories {
            table.add_row(row![category.id, category.name, category.color]);
        }
        table.printstd();

        Ok(())
    }

    fn check(completed: bool) -> &'static str {
        if completed {
            "✓"
        } else {
            ""
        }
    }

    fn due(task: &Task) -> String {
        task.due_date.map(|date| date.format("%Y-%m-%d").to_string()).unwrap_or_default()
    }

    // Completed tasks are never flagged as late.
    fn status(status: DateStatus, completed: bool) -> &'static str {
        if completed {
            "done"
        } else {
            status.label()
        }
    }
}
