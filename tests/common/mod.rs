#![allow(dead_code)]

//! In-memory mock of the remote API, served over real HTTP so the client
//! under test exercises its full request path. Handlers mirror the wire
//! contract the client consumes: camelCase JSON, `{error}` bodies on
//! failure, `{message}` bodies on mutations, and a bearer JWT carrying the
//! user id claim.

use std::net::TcpListener;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::{delete, get, post, put, web, App, HttpRequest, HttpResponse, HttpServer};
use async_trait::async_trait;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use taskpilot::auth::LoginRequest;
use taskpilot::models::{Priority, Task, User};
use taskpilot::session::SessionStore;

const JWT_SECRET: &[u8] = b"mock-server-secret";

#[derive(Debug, Serialize, Deserialize)]
struct MockClaims {
    id: i32,
    exp: usize,
}

fn issue_token(user_id: i32) -> String {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(24))
        .expect("valid timestamp")
        .timestamp() as usize;
    let claims = MockClaims {
        id: user_id,
        exp: expiration,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET),
    )
    .expect("token encoding")
}

/// Verifies the bearer token and returns the user id it was issued for.
fn authorize(req: &HttpRequest) -> Result<i32, HttpResponse> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let token = match header.strip_prefix("Bearer ") {
        Some(token) => token,
        None => {
            return Err(HttpResponse::Unauthorized().json(json!({
                "error": "Missing authorization header"
            })))
        }
    };
    decode::<MockClaims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET),
        &Validation::default(),
    )
    .map(|data| data.claims.id)
    .map_err(|e| {
        HttpResponse::Unauthorized().json(json!({
            "error": format!("Invalid token: {}", e)
        }))
    })
}

#[derive(Default)]
pub struct MockDb {
    users: Mutex<Vec<User>>,
    tasks: Mutex<Vec<Task>>,
    next_user_id: AtomicI32,
    next_task_id: AtomicI32,
}

#[post("/api/auth/register")]
async fn register(db: web::Data<MockDb>, body: web::Json<User>) -> HttpResponse {
    let mut users = db.users.lock().unwrap();
    if users.iter().any(|user| user.email == body.email) {
        return HttpResponse::BadRequest().json(json!({
            "error": "Email already registered"
        }));
    }
    let mut user = body.into_inner();
    user.id = db.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;
    users.push(user);
    HttpResponse::Created().json(json!({
        "message": "User registered successfully"
    }))
}

#[post("/api/auth/login")]
async fn login(db: web::Data<MockDb>, body: web::Json<LoginRequest>) -> HttpResponse {
    let users = db.users.lock().unwrap();
    let user = users
        .iter()
        .find(|user| {
            user.email == body.email && user.password.as_deref() == Some(body.password.as_str())
        });
    match user {
        Some(user) => HttpResponse::Ok().json(json!({ "token": issue_token(user.id) })),
        None => HttpResponse::Unauthorized().json(json!({ "error": "Invalid credentials" })),
    }
}

#[get("/api/tasks/count/all")]
async fn task_count(db: web::Data<MockDb>, req: HttpRequest) -> HttpResponse {
    let user_id = match authorize(&req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let count = db
        .tasks
        .lock()
        .unwrap()
        .iter()
        .filter(|task| task.user_id == Some(user_id))
        .count();
    HttpResponse::Ok().json(json!({ "taskCount": count }))
}

#[get("/api/tasks/count/done")]
async fn done_task_count(db: web::Data<MockDb>, req: HttpRequest) -> HttpResponse {
    let user_id = match authorize(&req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let count = db
        .tasks
        .lock()
        .unwrap()
        .iter()
        .filter(|task| task.user_id == Some(user_id) && task.is_completed)
        .count();
    HttpResponse::Ok().json(json!({ "doneTaskCount": count }))
}

#[get("/api/tasks/priorities")]
async fn priorities(req: HttpRequest) -> HttpResponse {
    if let Err(resp) = authorize(&req) {
        return resp;
    }
    HttpResponse::Ok().json(vec![
        Priority {
            id: 1,
            name: "Low".to_string(),
        },
        Priority {
            id: 2,
            name: "Medium".to_string(),
        },
        Priority {
            id: 3,
            name: "High".to_string(),
        },
    ])
}

#[get("/api/tasks")]
async fn get_tasks(db: web::Data<MockDb>, req: HttpRequest) -> HttpResponse {
    let user_id = match authorize(&req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let tasks: Vec<Task> = db
        .tasks
        .lock()
        .unwrap()
        .iter()
        .filter(|task| task.user_id == Some(user_id))
        .cloned()
        .collect();
    HttpResponse::Ok().json(tasks)
}

#[get("/api/tasks/{id}")]
async fn get_task(db: web::Data<MockDb>, req: HttpRequest, path: web::Path<i32>) -> HttpResponse {
    let user_id = match authorize(&req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let id = path.into_inner();
    let tasks = db.tasks.lock().unwrap();
    match tasks
        .iter()
        .find(|task| task.id == Some(id) && task.user_id == Some(user_id))
    {
        Some(task) => HttpResponse::Ok().json(task),
        None => HttpResponse::NotFound().json(json!({ "error": "Task not found" })),
    }
}

#[post("/api/tasks")]
async fn create_task(
    db: web::Data<MockDb>,
    req: HttpRequest,
    body: web::Json<Task>,
) -> HttpResponse {
    let user_id = match authorize(&req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if body.title.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Title is required" }));
    }
    let mut task = body.into_inner();
    task.id = Some(db.next_task_id.fetch_add(1, Ordering::SeqCst) + 1);
    task.user_id = Some(user_id);
    db.tasks.lock().unwrap().push(task);
    HttpResponse::Created().json(json!({ "message": "Task created successfully" }))
}

#[put("/api/tasks/completion/{id}")]
async fn set_completion(
    db: web::Data<MockDb>,
    req: HttpRequest,
    path: web::Path<i32>,
    body: web::Json<bool>,
) -> HttpResponse {
    let user_id = match authorize(&req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let id = path.into_inner();
    let mut tasks = db.tasks.lock().unwrap();
    match tasks
        .iter_mut()
        .find(|task| task.id == Some(id) && task.user_id == Some(user_id))
    {
        Some(task) => {
            task.is_completed = body.into_inner();
            // No message field: the client is expected to fall back to its
            // default wording.
            HttpResponse::Ok().json(json!({}))
        }
        None => HttpResponse::NotFound().json(json!({ "error": "Task not found" })),
    }
}

#[put("/api/tasks/{id}")]
async fn update_task(
    db: web::Data<MockDb>,
    req: HttpRequest,
    path: web::Path<i32>,
    body: web::Json<Task>,
) -> HttpResponse {
    let user_id = match authorize(&req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let id = path.into_inner();
    let mut tasks = db.tasks.lock().unwrap();
    match tasks
        .iter_mut()
        .find(|task| task.id == Some(id) && task.user_id == Some(user_id))
    {
        Some(task) => {
            let mut updated = body.into_inner();
            updated.id = Some(id);
            updated.user_id = Some(user_id);
            *task = updated;
            HttpResponse::Ok().json(json!({ "message": "Task updated successfully" }))
        }
        None => HttpResponse::NotFound().json(json!({ "error": "Task not found" })),
    }
}

#[delete("/api/tasks/{id}")]
async fn delete_task(
    db: web::Data<MockDb>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> HttpResponse {
    let user_id = match authorize(&req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let id = path.into_inner();
    let mut tasks = db.tasks.lock().unwrap();
    let before = tasks.len();
    tasks.retain(|task| !(task.id == Some(id) && task.user_id == Some(user_id)));
    if tasks.len() == before {
        return HttpResponse::NotFound().json(json!({ "error": "Task not found" }));
    }
    HttpResponse::Ok().json(json!({ "message": "Task deleted successfully" }))
}

#[get("/api/users/{id}")]
async fn get_user(db: web::Data<MockDb>, req: HttpRequest, path: web::Path<i32>) -> HttpResponse {
    if let Err(resp) = authorize(&req) {
        return resp;
    }
    let id = path.into_inner();
    let users = db.users.lock().unwrap();
    match users.iter().find(|user| user.id == id) {
        Some(user) => {
            let mut user = user.clone();
            user.password = None;
            HttpResponse::Ok().json(user)
        }
        None => HttpResponse::NotFound().json(json!({ "error": "User not found" })),
    }
}

/// Starts the mock API on a random port and returns its base URL.
///
/// More specific task routes are registered before `/api/tasks/{id}` so the
/// count and priority paths never match as ids.
pub async fn spawn_mock_api() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let state = web::Data::new(MockDb::default());
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(register)
            .service(login)
            .service(task_count)
            .service(done_task_count)
            .service(priorities)
            .service(get_tasks)
            .service(create_task)
            .service(set_completion)
            .service(get_task)
            .service(update_task)
            .service(delete_task)
            .service(get_user)
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to listen on bound port")
    .run();

    actix_web::rt::spawn(server);

    format!("http://127.0.0.1:{}", port)
}

/// In-memory `SessionStore` used to drive view-models in tests.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<Mutex<Option<(String, i32)>>>,
}

impl MemorySessionStore {
    pub fn with_token(token: &str, user_id: i32) -> Self {
        let store = Self::default();
        *store.inner.lock().unwrap() = Some((token.to_string(), user_id));
        store
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, token: &str, user_id: i32) -> std::io::Result<()> {
        *self.inner.lock().unwrap() = Some((token.to_string(), user_id));
        Ok(())
    }

    async fn token(&self) -> Option<String> {
        self.inner.lock().unwrap().as_ref().map(|s| s.0.clone())
    }

    async fn user_id(&self) -> i32 {
        self.inner.lock().unwrap().as_ref().map(|s| s.1).unwrap_or(-1)
    }

    async fn clear(&self) -> std::io::Result<()> {
        *self.inner.lock().unwrap() = None;
        Ok(())
    }
}

/// Registers a user against the mock API and logs in, returning the token.
pub async fn register_and_login(
    repo: &impl taskpilot::repos::AuthRepository,
    email: &str,
    password: &str,
) -> String {
    let user = User {
        id: 0,
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: email.to_string(),
        password: Some(password.to_string()),
    };
    repo.register(&user).await.expect("registration failed");
    let response = repo.login(email, password).await;
    response.token.expect("login failed")
}
