use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::db::ProjectDao;
use crate::error::AppError;
use crate::models::{NewProject, OrNone, Project};
use crate::service::ProjectService;
use crate::ui::prompt::{Console, InputError};

const OPERATIONS: [&str; 5] = [
    "1) Add a project",
    "2) List projects",
    "3) Select a project",
    "4) Update project details",
    "5) Delete a project",
];

// Represents an entry picked from the menu
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuAction {
    Add,
    List,
    Select,
    Update,
    Delete,
    Exit,
    Unknown(i32),
}

impl From<Option<i32>> for MenuAction {
    fn from(selection: Option<i32>) -> Self {
        match selection {
            None => MenuAction::Exit,
            Some(1) => MenuAction::Add,
            Some(2) => MenuAction::List,
            Some(3) => MenuAction::Select,
            Some(4) => MenuAction::Update,
            Some(5) => MenuAction::Delete,
            Some(other) => MenuAction::Unknown(other),
        }
    }
}

/// State carried between menu iterations: the project being worked on, if any.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<Project>,
}

impl Session {
    pub fn current(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    pub fn select(&mut self, project: Project) {
        self.current = Some(project);
    }

    /// Drop the selection if it refers to the project that was just deleted.
    pub fn project_deleted(&mut self, id: i32) {
        if self.current.as_ref().is_some_and(|p| p.id == id) {
            self.current = None;
        }
    }
}

/// Run the menu until the user exits.
///
/// Errors from a single action are printed and the menu is shown again.
/// Only a failure to write to the console ends the loop early.
pub async fn run<D, R, W>(
    service: &ProjectService<D>,
    console: &mut Console<R, W>,
    session: &mut Session,
) -> Result<(), AppError>
where
    D: ProjectDao,
    R: BufRead,
    W: Write,
{
    loop {
        match process_selection(service, console, session).await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(AppError::Io(err)) => return Err(AppError::Io(err)),
            Err(err) => {
                warn!(error = %err, "menu action failed");
                console.line(format_args!("\nError: {err}. Try again."))?;
            }
        }
    }
}

/// Show the menu, read one selection and perform it. Returns `true` on exit.
async fn process_selection<D, R, W>(
    service: &ProjectService<D>,
    console: &mut Console<R, W>,
    session: &mut Session,
) -> Result<bool, AppError>
where
    D: ProjectDao,
    R: BufRead,
    W: Write,
{
    print_operations(console, session)?;

    let action = MenuAction::from(console.int_input("Enter a menu selection")?);
    debug!(?action, "menu selection");

    match action {
        MenuAction::Exit => {
            console.line("Exiting the menu.")?;
            return Ok(true);
        }
        MenuAction::Add => create_project(service, console).await?,
        MenuAction::List => list_projects(service, console).await?,
        MenuAction::Select => select_project(service, console, session).await?,
        MenuAction::Update => update_project_details(service, console, session).await?,
        MenuAction::Delete => delete_project(service, console, session).await?,
        MenuAction::Unknown(selection) => {
            console.line(format_args!(
                "\n{selection} is not a valid selection. Try again."
            ))?;
        }
    }

    Ok(false)
}

fn print_operations<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &Session,
) -> Result<(), AppError> {
    console.line("\nThese are the available selections. Press the Enter key to quit:")?;
    for operation in OPERATIONS {
        console.line(format_args!("  {operation}"))?;
    }

    match session.current() {
        Some(project) => console.line(format_args!("\nYou are working with project: {project}"))?,
        None => console.line("\nYou are not working with a project.")?,
    }

    Ok(())
}

async fn create_project<D, R, W>(
    service: &ProjectService<D>,
    console: &mut Console<R, W>,
) -> Result<(), AppError>
where
    D: ProjectDao,
    R: BufRead,
    W: Write,
{
    let name = console.string_input("Enter the project name")?;
    let estimated_hours = console.decimal_input("Enter the estimated hours")?;
    let actual_hours = console.decimal_input("Enter the actual hours")?;
    let difficulty = console.int_input("Enter the project difficulty (1-5)")?;
    let notes = console.string_input("Enter the project notes")?;

    let project = NewProject {
        name: name.ok_or(InputError::Required("a project name"))?,
        estimated_hours,
        actual_hours,
        difficulty,
        notes,
    };

    let created = service.add_project(&project).await?;
    console.line(format_args!(
        "You have successfully created project: {created}"
    ))?;

    Ok(())
}

async fn list_projects<D, R, W>(
    service: &ProjectService<D>,
    console: &mut Console<R, W>,
) -> Result<(), AppError>
where
    D: ProjectDao,
    R: BufRead,
    W: Write,
{
    let projects = service.fetch_all_projects().await?;

    console.line("\nProjects:")?;
    for project in &projects {
        console.line(format_args!("   {}: {}", project.id, project.name))?;
    }

    Ok(())
}

async fn select_project<D, R, W>(
    service: &ProjectService<D>,
    console: &mut Console<R, W>,
    session: &mut Session,
) -> Result<(), AppError>
where
    D: ProjectDao,
    R: BufRead,
    W: Write,
{
    list_projects(service, console).await?;

    let id = console
        .int_input("Enter a project ID to select a project")?
        .ok_or(InputError::Required("a project ID"))?;

    let project = service.fetch_project_by_id(id).await?;
    session.select(project);

    Ok(())
}

async fn update_project_details<D, R, W>(
    service: &ProjectService<D>,
    console: &mut Console<R, W>,
    session: &mut Session,
) -> Result<(), AppError>
where
    D: ProjectDao,
    R: BufRead,
    W: Write,
{
    let Some(current) = session.current().cloned() else {
        console.line("\nPlease select a project.")?;
        return Ok(());
    };

    let name = console.string_input(&format!("Enter the project name [{}]", current.name))?;
    let estimated_hours = console.decimal_input(&format!(
        "Enter the estimated hours [{}]",
        OrNone(&current.estimated_hours)
    ))?;
    let actual_hours = console.decimal_input(&format!(
        "Enter the actual hours [{}]",
        OrNone(&current.actual_hours)
    ))?;
    let difficulty = console.int_input(&format!(
        "Enter the project difficulty (1-5) [{}]",
        OrNone(&current.difficulty)
    ))?;
    let notes = console.string_input(&format!(
        "Enter the project notes [{}]",
        OrNone(&current.notes)
    ))?;

    let project = Project {
        id: current.id,
        name: name.unwrap_or(current.name),
        estimated_hours: estimated_hours.or(current.estimated_hours),
        actual_hours: actual_hours.or(current.actual_hours),
        difficulty: difficulty.or(current.difficulty),
        notes: notes.or(current.notes),
    };

    service.modify_project_details(&project).await?;

    let refreshed = service.fetch_project_by_id(project.id).await?;
    session.select(refreshed);

    Ok(())
}

async fn delete_project<D, R, W>(
    service: &ProjectService<D>,
    console: &mut Console<R, W>,
    session: &mut Session,
) -> Result<(), AppError>
where
    D: ProjectDao,
    R: BufRead,
    W: Write,
{
    list_projects(service, console).await?;

    let id = console
        .int_input("Enter the ID of the project to delete")?
        .ok_or(InputError::Required("a project ID"))?;

    service.delete_project(id).await?;
    console.line(format_args!("Project {id} was deleted successfully."))?;

    session.project_deleted(id);

    Ok(())
}
