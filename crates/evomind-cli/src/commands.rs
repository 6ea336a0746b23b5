//! Command handlers
//!
//! Each handler stands in for one screen of the mobile app. Session state
//! always comes from a fresh bootstrap read.

use std::sync::Arc;

use anyhow::{bail, Result};

use evomind_core::api::{HabitDraft, NewUser, ProfileUpdate, TaskDraft};
use evomind_core::constants::session::SPLASH_DELAY;
use evomind_core::plan::{PlanHabit, PlanTask};
use evomind_core::{
    ApiClient, EmotionSource, InitialRoute, KeyValueStore, PlanItemStatusController,
    SessionBootstrapResolver, SessionContext, TaskStatus,
};

use crate::{PlanCommands, ProfileCommands, TodoCommands};

async fn load_session(store: Arc<dyn KeyValueStore>) -> SessionContext {
    SessionBootstrapResolver::new(store).resolve().await.session
}

async fn current_user(store: Arc<dyn KeyValueStore>) -> Result<String> {
    let session = load_session(store).await;
    match session.require_user() {
        Ok(id) => Ok(id.to_string()),
        Err(_) => bail!("User not found. Please log in again."),
    }
}

/// Blank optional input counts as not given
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Splash screen: wait, then route
pub async fn start(store: Arc<dyn KeyValueStore>, no_splash: bool) -> Result<()> {
    println!("EvoMind");
    if !no_splash {
        tokio::time::sleep(SPLASH_DELAY).await;
    }

    let bootstrap = SessionBootstrapResolver::new(store).resolve().await;
    match bootstrap.route {
        InitialRoute::Main => {
            let user = bootstrap.session.user_id().unwrap_or_default();
            println!("Welcome back ({}).", user);
            println!("  evomind plan              Show today's plan");
            println!("  evomind todo              Manage tasks and habits");
            println!("  evomind mood <emotion>    Check in on your mood");
            println!("  evomind profile           View your profile");
        }
        InitialRoute::Login => {
            println!("Please sign in.");
            println!("  evomind login --email <email> --password <password>");
            println!("  evomind register --name <name> --email <email> --password <password>");
        }
        InitialRoute::Onboarding => {
            println!("Track your tasks, build habits, and check in on your mood.");
            println!("  evomind onboarding        Finish onboarding");
            println!("  evomind onboarding --skip Skip onboarding");
        }
    }
    Ok(())
}

/// Onboarding finish or skip: both set the same flag
pub async fn onboarding(store: Arc<dyn KeyValueStore>, skip: bool) -> Result<()> {
    let mut session = load_session(store).await;
    session.complete_onboarding().await?;
    tracing::info!("Onboarding {}", if skip { "skipped" } else { "finished" });
    println!("You're all set. Sign in with `evomind login`.");
    Ok(())
}

pub async fn register(
    client: &ApiClient,
    name: String,
    email: String,
    password: String,
) -> Result<()> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        bail!("Name, email, and password are all required.");
    }

    let user = NewUser {
        name,
        email,
        password,
    };
    match client.register(&user).await {
        Ok(()) => {
            println!("Account created. Sign in with `evomind login`.");
            Ok(())
        }
        Err(e) => bail!("Registration failed: {}", e.user_message("Something went wrong.")),
    }
}

pub async fn login(
    store: Arc<dyn KeyValueStore>,
    client: &ApiClient,
    email: &str,
    password: &str,
) -> Result<()> {
    if email.trim().is_empty() || password.is_empty() {
        bail!("Email and password are required.");
    }

    let response = match client.login(email, password).await {
        Ok(response) => response,
        Err(e) => bail!("Login failed: {}", e.user_message("Something went wrong.")),
    };

    let mut session = load_session(store).await;
    session.log_in(&response.user_id).await?;
    println!("Logged in successfully!");
    Ok(())
}

pub async fn logout(store: Arc<dyn KeyValueStore>) -> Result<()> {
    let mut session = load_session(store).await;
    session.log_out().await?;
    println!("You have been logged out.");
    Ok(())
}

/// Today's plan screen
pub async fn plan(
    store: Arc<dyn KeyValueStore>,
    client: Arc<ApiClient>,
    action: PlanCommands,
) -> Result<()> {
    let user_id = current_user(store).await?;

    let controller = PlanItemStatusController::new(client, user_id);
    if let Err(e) = controller.refresh().await {
        bail!(
            "Error fetching today plan: {}",
            e.user_message("Could not load today's plan.")
        );
    }

    match action {
        PlanCommands::Show => print_plan(&controller.tasks(), &controller.habits()),
        PlanCommands::Start { task_id } => {
            advance(&controller, &task_id, TaskStatus::Ongoing).await?
        }
        PlanCommands::Complete { task_id } => {
            advance(&controller, &task_id, TaskStatus::Completed).await?
        }
        PlanCommands::Habit { habit_id } => {
            match controller.complete_habit_occurrence(&habit_id).await {
                Ok(updated) => println!("Habit {} progress: {}", habit_id, updated.progress),
                Err(e) => bail!(e.user_message("Failed to update habit")),
            }
        }
    }
    Ok(())
}

async fn advance(
    controller: &PlanItemStatusController,
    task_id: &str,
    to: TaskStatus,
) -> Result<()> {
    let Some(task) = controller.task(task_id) else {
        bail!("Task {} is not in today's plan.", task_id);
    };

    match controller.advance_task(task_id, task.status, to).await {
        Ok(updated) => {
            println!("{} - Status: {}", task.title, updated.status);
            Ok(())
        }
        Err(e) => bail!(e.user_message("Failed to update task")),
    }
}

fn print_plan(tasks: &[PlanTask], habits: &[PlanHabit]) {
    println!("Today's Plan");
    println!();
    println!("Tasks");
    if tasks.is_empty() {
        println!("  No tasks for today");
    }
    for task in tasks {
        let due = task
            .due_on()
            .map(|d| format!(" (due {})", d))
            .unwrap_or_default();
        let action = match task.status.next() {
            Some(TaskStatus::Ongoing) => format!("  [evomind plan start {}]", task.id),
            Some(TaskStatus::Completed) => format!("  [evomind plan complete {}]", task.id),
            _ => String::new(),
        };
        println!("  {} - Status: {}{}{}", task.title, task.status, due, action);
    }

    println!();
    println!("Habits");
    if habits.is_empty() {
        println!("  No habits for today");
    }
    for habit in habits {
        println!(
            "  {} ({}) - Progress: {}  [evomind plan habit {}]",
            habit.title, habit.frequency, habit.progress, habit.id
        );
    }
}

/// Emotion check-in
pub async fn mood(
    store: Arc<dyn KeyValueStore>,
    client: &ApiClient,
    emotion: &str,
    source: EmotionSource,
) -> Result<()> {
    if emotion.trim().is_empty() {
        bail!("Pick an emotion first.");
    }
    let user_id = current_user(store).await?;

    match client.log_emotion(&user_id, emotion.trim(), source).await {
        Ok(()) => {
            println!("Emotion saved: {}", emotion.trim());
            Ok(())
        }
        Err(e) => bail!(e.user_message("Failed to save emotion")),
    }
}

/// To-do screen: full task and habit lists
pub async fn todo(
    store: Arc<dyn KeyValueStore>,
    client: &ApiClient,
    action: TodoCommands,
) -> Result<()> {
    let user_id = current_user(store).await?;

    match action {
        TodoCommands::List => {
            let tasks = client
                .list_tasks(&user_id)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message("Failed to fetch tasks")))?;
            let habits = client
                .list_habits(&user_id)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message("Failed to fetch habits")))?;
            print_todos(&tasks, &habits);
        }
        TodoCommands::AddTask {
            title,
            description,
            due,
        } => {
            if title.trim().is_empty() {
                bail!("Title is required.");
            }
            let draft = TaskDraft {
                title,
                description: non_blank(description),
                due_date: non_blank(due),
            };
            match client.create_task(&user_id, draft).await {
                Ok(task) => println!("Task added ({}).", task.id),
                Err(e) => bail!(e.user_message("Failed to add task")),
            }
        }
        TodoCommands::AddHabit {
            title,
            description,
            frequency,
        } => {
            if title.trim().is_empty() || frequency.trim().is_empty() {
                bail!("Title and frequency are required.");
            }
            let draft = HabitDraft {
                title,
                description: non_blank(description),
                frequency,
            };
            match client.create_habit(&user_id, draft).await {
                Ok(habit) => println!("Habit added ({}).", habit.id),
                Err(e) => bail!(e.user_message("Failed to add habit")),
            }
        }
        TodoCommands::EditTask {
            task_id,
            title,
            description,
            due,
        } => {
            let tasks = client
                .list_tasks(&user_id)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message("Failed to fetch tasks")))?;
            let Some(mut task) = tasks.into_iter().find(|t| t.id == task_id) else {
                bail!("Task {} not found.", task_id);
            };
            if let Some(title) = non_blank(title) {
                task.title = title;
            }
            if let Some(description) = description {
                task.description = non_blank(Some(description));
            }
            if let Some(due) = due {
                task.due_date = non_blank(Some(due));
            }
            match client.update_task(&user_id, &task).await {
                Ok(()) => println!("Task updated: {}", task.title),
                Err(e) => bail!(e.user_message("Failed to update task")),
            }
        }
        TodoCommands::EditHabit {
            habit_id,
            title,
            description,
            frequency,
        } => {
            let habits = client
                .list_habits(&user_id)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message("Failed to fetch habits")))?;
            let Some(mut habit) = habits.into_iter().find(|h| h.id == habit_id) else {
                bail!("Habit {} not found.", habit_id);
            };
            if let Some(title) = non_blank(title) {
                habit.title = title;
            }
            if let Some(description) = description {
                habit.description = non_blank(Some(description));
            }
            if let Some(frequency) = non_blank(frequency) {
                habit.frequency = frequency;
            }
            match client.update_habit(&user_id, &habit).await {
                Ok(()) => println!("Habit updated: {}", habit.title),
                Err(e) => bail!(e.user_message("Failed to update habit")),
            }
        }
        TodoCommands::DeleteTask { task_id } => {
            match client.delete_task(&user_id, &task_id).await {
                Ok(()) => println!("Task deleted."),
                Err(e) => bail!(e.user_message("Failed to delete task")),
            }
        }
        TodoCommands::DeleteHabit { habit_id } => {
            match client.delete_habit(&user_id, &habit_id).await {
                Ok(()) => println!("Habit deleted."),
                Err(e) => bail!(e.user_message("Failed to delete habit")),
            }
        }
    }
    Ok(())
}

/// Profile screen
pub async fn profile(
    store: Arc<dyn KeyValueStore>,
    client: &ApiClient,
    action: ProfileCommands,
) -> Result<()> {
    let user_id = current_user(store).await?;

    match action {
        ProfileCommands::Show => {
            let profile = client
                .profile(&user_id)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message("Failed to fetch user data.")))?;
            println!("{}", profile.name);
            println!("  Email:           {}", profile.email);
            println!("  Tasks completed: {}", profile.completed_task_count());
            println!(
                "  Current mood:    {}",
                profile.current_emotion().unwrap_or("not logged yet")
            );
        }
        ProfileCommands::Update { name, email } => {
            let update = ProfileUpdate {
                name: non_blank(name),
                email: non_blank(email),
            };
            if update.is_empty() {
                bail!("Nothing to update. Pass --name and/or --email.");
            }
            match client.update_profile(&user_id, &update).await {
                Ok(profile) => println!("Profile updated: {} <{}>", profile.name, profile.email),
                Err(e) => bail!(e.user_message("Failed to update profile")),
            }
        }
        ProfileCommands::Password { old, new, confirm } => {
            check_password_change(&old, &new, &confirm)?;
            match client.change_password(&user_id, &old, &new).await {
                Ok(()) => println!("Password changed successfully."),
                Err(e) => bail!(e.user_message("Failed to change password")),
            }
        }
    }
    Ok(())
}

fn check_password_change(old: &str, new: &str, confirm: &str) -> Result<()> {
    if old.is_empty() || new.is_empty() || confirm.is_empty() {
        bail!("Please fill in all password fields.");
    }
    if new != confirm {
        bail!("New passwords do not match.");
    }
    Ok(())
}

fn print_todos(tasks: &[PlanTask], habits: &[PlanHabit]) {
    println!("Tasks");
    if tasks.is_empty() {
        println!("  No tasks yet");
    }
    for task in tasks {
        let due = task
            .due_on()
            .map(|d| format!(" (due {})", d))
            .unwrap_or_default();
        println!("  [{}] {} - {}{}", task.id, task.title, task.status, due);
    }

    println!();
    println!("Habits");
    if habits.is_empty() {
        println!("  No habits yet");
    }
    for habit in habits {
        println!(
            "  [{}] {} ({}) - Progress: {}",
            habit.id, habit.title, habit.frequency, habit.progress
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_change_checks() {
        assert!(check_password_change("old", "new", "new").is_ok());

        let err = check_password_change("old", "new", "typo").unwrap_err();
        assert_eq!(err.to_string(), "New passwords do not match.");

        assert!(check_password_change("", "new", "new").is_err());
        assert!(check_password_change("old", "", "").is_err());
    }

    #[test]
    fn test_blank_input_is_none() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("x".to_string())), Some("x".to_string()));
    }
}
