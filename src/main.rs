use std::env;
use std::process::exit;

use validator::Validate;

use taskpilot::auth::LoginRequest;
use taskpilot::config::Config;
use taskpilot::models::{Task, User};
use taskpilot::repos::{HttpAuthRepository, HttpTaskRepository, HttpUserRepository};
use taskpilot::session::SessionStore;
use taskpilot::state::UiState;
use taskpilot::viewmodel::{AuthViewModel, HomeViewModel, TaskViewModel, UserViewModel};
use taskpilot::{ApiClient, FileSessionStore};

fn usage() -> ! {
    eprintln!("Usage: taskpilot <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  login <email> <password>");
    eprintln!("  register <first-name> <last-name> <email> <password>");
    eprintln!("  tasks");
    eprintln!("  add <title> <description> <priority-id> <due-date YYYY-MM-DDTHH:MM>");
    eprintln!("  complete <id> <true|false>");
    eprintln!("  delete <id>");
    eprintln!("  clear-completed");
    eprintln!("  home");
    eprintln!("  profile");
    eprintln!("  logout");
    exit(2);
}

fn arg(args: &[String], index: usize) -> &str {
    match args.get(index) {
        Some(value) => value,
        None => usage(),
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let api = ApiClient::new(&config.base_url);
    let store = FileSessionStore::new(&config.session_file);

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("");

    match command {
        "login" => {
            let request = LoginRequest {
                email: arg(&args, 1).to_string(),
                password: arg(&args, 2).to_string(),
            };
            if let Err(e) = request.validate() {
                eprintln!("Invalid input: {}", e);
                exit(1);
            }

            let vm = AuthViewModel::new(HttpAuthRepository::new(api), store.clone());
            vm.login(&request.email, &request.password).await;
            match vm.login_state().borrow().clone() {
                UiState::Success(_) => {
                    println!("Logged in as user {}", store.user_id().await);
                }
                UiState::Error(message) => {
                    eprintln!("Login failed: {}", message);
                    exit(1);
                }
                _ => {}
            }
        }
        "register" => {
            let user = User {
                id: 0,
                first_name: arg(&args, 1).to_string(),
                last_name: arg(&args, 2).to_string(),
                email: arg(&args, 3).to_string(),
                password: Some(arg(&args, 4).to_string()),
            };
            if let Err(e) = user.validate() {
                eprintln!("Invalid input: {}", e);
                exit(1);
            }

            let vm = AuthViewModel::new(HttpAuthRepository::new(api), store);
            vm.register(&user).await;
            match vm.register_state().borrow().clone() {
                UiState::Success(message) => println!("{}", message),
                UiState::Error(message) => {
                    eprintln!("Registration failed: {}", message);
                    exit(1);
                }
                _ => {}
            }
        }
        "tasks" => {
            let vm = TaskViewModel::new(HttpTaskRepository::new(api), store);
            vm.fetch_priorities().await;
            vm.fetch_tasks().await;
            match vm.task_state().borrow().clone() {
                UiState::Success(tasks) => {
                    if tasks.is_empty() {
                        println!("No tasks.");
                    }
                    for task in tasks {
                        println!(
                            "[{}] #{} {} (due {}, {})",
                            if task.is_completed { "x" } else { " " },
                            task.id.unwrap_or_default(),
                            task.title,
                            task.due_date,
                            vm.priority_name(task.priority_id),
                        );
                    }
                }
                UiState::Error(message) => {
                    eprintln!("{}", message);
                    exit(1);
                }
                _ => {}
            }
        }
        "add" => {
            let user_id = store.user_id().await;
            let task = Task::new(
                arg(&args, 1),
                arg(&args, 2),
                arg(&args, 3).parse().unwrap_or_else(|_| usage()),
                arg(&args, 4),
                Some(user_id),
            );
            if let Err(e) = task.validate() {
                eprintln!("Invalid input: {}", e);
                exit(1);
            }

            let vm = TaskViewModel::new(HttpTaskRepository::new(api), store);
            vm.create_task(&task).await;
            report_operation(vm.operation_state().borrow().clone());
        }
        "complete" => {
            let id = arg(&args, 1).parse().unwrap_or_else(|_| usage());
            let is_completed = arg(&args, 2).parse().unwrap_or_else(|_| usage());

            let vm = TaskViewModel::new(HttpTaskRepository::new(api), store);
            vm.set_task_completion(id, is_completed).await;
            report_operation(vm.operation_state().borrow().clone());
        }
        "delete" => {
            let id = arg(&args, 1).parse().unwrap_or_else(|_| usage());

            let vm = TaskViewModel::new(HttpTaskRepository::new(api), store);
            vm.delete_task(id).await;
            report_operation(vm.operation_state().borrow().clone());
        }
        "clear-completed" => {
            let vm = TaskViewModel::new(HttpTaskRepository::new(api), store);
            vm.delete_completed_tasks().await;
            report_operation(vm.operation_state().borrow().clone());
        }
        "home" => {
            let vm = HomeViewModel::new(HttpTaskRepository::new(api), store);
            vm.fetch_task_counts().await;
            println!(
                "{} of {} tasks completed",
                *vm.completed_tasks().borrow(),
                *vm.total_tasks().borrow()
            );
        }
        "profile" => {
            let user_id = store.user_id().await;
            let vm = UserViewModel::new(HttpUserRepository::new(api), store);
            vm.get_user_by_id(user_id).await;
            match vm.user_state().borrow().clone() {
                UiState::Success(user) => {
                    println!("{} <{}>", user.full_name(), user.email);
                }
                UiState::Error(message) => {
                    eprintln!("{}", message);
                    exit(1);
                }
                _ => {}
            }
        }
        "logout" => {
            if let Err(e) = store.clear().await {
                eprintln!("Failed to clear session: {}", e);
                exit(1);
            }
            println!("Logged out.");
        }
        _ => usage(),
    }
}

fn report_operation(state: UiState<String>) {
    match state {
        UiState::Success(message) => println!("{}", message),
        UiState::Error(message) => {
            eprintln!("{}", message);
            exit(1);
        }
        _ => {}
    }
}
