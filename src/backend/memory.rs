use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::query::{parse_columns, Column};
use super::{AuthSession, Backend, BackendError, BackendResult, BackendUser, Order, Query};

struct StoredUser {
    id: String,
    email: String,
    password: String,
    confirmed: bool,
}

#[derive(Default)]
struct State {
    users: Vec<StoredUser>,
    tokens: HashMap<String, String>,
    tables: HashMap<String, Vec<Value>>,
    inserts: Vec<(String, Value)>,
    failing: HashSet<String>,
    require_confirmation: bool,
}

/// Process-local stand-in for the hosted service. Rows are plain JSON
/// objects; queries are evaluated the way the REST API evaluates them.
#[derive(Default)]
pub struct InMemoryBackend {
    state: Mutex<State>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign-ups succeed but return no session, as with e-mail confirmation on.
    pub async fn require_confirmation(&self) {
        self.state.lock().await.require_confirmation = true;
    }

    pub async fn create_user(&self, email: &str, password: &str) -> BackendUser {
        let mut state = self.state.lock().await;
        let id = Uuid::new_v4().to_string();
        state.users.push(StoredUser {
            id: id.clone(),
            email: email.to_string(),
            password: password.to_string(),
            confirmed: true,
        });
        BackendUser {
            id,
            email: Some(email.to_string()),
        }
    }

    /// Issues an access token for an existing user id.
    pub async fn issue_token(&self, user_id: &str) -> String {
        let token = Uuid::new_v4().to_string();
        self.state
            .lock()
            .await
            .tokens
            .insert(token.clone(), user_id.to_string());
        token
    }

    pub async fn seed(&self, table: &str, rows: Vec<Value>) {
        self.state
            .lock()
            .await
            .tables
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.state
            .lock()
            .await
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Insert payloads exactly as they were submitted, oldest first.
    pub async fn inserts(&self, table: &str) -> Vec<Value> {
        self.state
            .lock()
            .await
            .inserts
            .iter()
            .filter(|(t, _)| t == table)
            .map(|(_, row)| row.clone())
            .collect()
    }

    /// Every later select or insert on `table` fails with a 500.
    pub async fn fail_table(&self, table: &str) {
        self.state.lock().await.failing.insert(table.to_string());
    }

    pub async fn is_token_active(&self, token: &str) -> bool {
        self.state.lock().await.tokens.contains_key(token)
    }
}

impl State {
    fn check_table(&self, table: &str) -> BackendResult<()> {
        if self.failing.contains(table) {
            return Err(BackendError::Api {
                status: 500,
                message: format!("table {} is unavailable", table),
            });
        }
        Ok(())
    }

    fn check_token(&self, access_token: Option<&str>) -> BackendResult<()> {
        match access_token {
            Some(token) if !self.tokens.contains_key(token) => Err(BackendError::Api {
                status: 401,
                message: "JWT expired".to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn start_session(&mut self, user_id: &str, email: &str) -> AuthSession {
        let token = Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), user_id.to_string());
        AuthSession {
            access_token: token,
            refresh_token: Some(Uuid::new_v4().to_string()),
            expires_in: Some(3600),
            user: BackendUser {
                id: user_id.to_string(),
                email: Some(email.to_string()),
            },
        }
    }

    fn project(&self, row: &Value, columns: &[Column]) -> Value {
        let mut out = Map::new();
        for column in columns {
            match column {
                Column::All => {
                    if let Value::Object(fields) = row {
                        out.extend(fields.clone());
                    }
                }
                Column::Field(name) => {
                    out.insert(name.clone(), row.get(name).cloned().unwrap_or(Value::Null));
                }
                Column::Embed { relation, columns } => {
                    let embedded = self
                        .related_row(row, relation)
                        .map(|related| self.project(related, columns))
                        .unwrap_or(Value::Null);
                    out.insert(relation.clone(), embedded);
                }
            }
        }
        Value::Object(out)
    }

    /// Follows the `<singular>_id` foreign key of `row` into `relation`.
    fn related_row(&self, row: &Value, relation: &str) -> Option<&Value> {
        let singular = relation.strip_suffix('s').unwrap_or(relation);
        let key = row.get(format!("{}_id", singular))?;
        self.tables
            .get(relation)?
            .iter()
            .find(|candidate| candidate.get("id") == Some(key))
    }
}

fn field_matches(value: Option<&Value>, expected: &str) -> bool {
    match value {
        Some(Value::String(s)) => s == expected,
        Some(Value::Null) | None => expected == "null",
        Some(other) => other.to_string() == expected,
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        // Nulls sort last, as in Postgres ascending order
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        _full_name: &str,
    ) -> BackendResult<Option<AuthSession>> {
        let mut state = self.state.lock().await;
        if state.users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(BackendError::Api {
                status: 422,
                message: "User already registered".to_string(),
            });
        }

        let id = Uuid::new_v4().to_string();
        let confirmed = !state.require_confirmation;
        state.users.push(StoredUser {
            id: id.clone(),
            email: email.to_string(),
            password: password.to_string(),
            confirmed,
        });

        if !confirmed {
            return Ok(None);
        }
        Ok(Some(state.start_session(&id, email)))
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> BackendResult<AuthSession> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email) && u.password == password)
            .map(|u| (u.id.clone(), u.email.clone(), u.confirmed))
            .ok_or(BackendError::InvalidCredentials)?;

        if !user.2 {
            return Err(BackendError::Api {
                status: 400,
                message: "Email not confirmed".to_string(),
            });
        }
        Ok(state.start_session(&user.0, &user.1))
    }

    async fn get_user(&self, access_token: &str) -> BackendResult<Option<BackendUser>> {
        let state = self.state.lock().await;
        let user = state.tokens.get(access_token).and_then(|user_id| {
            state.users.iter().find(|u| &u.id == user_id).map(|u| BackendUser {
                id: u.id.clone(),
                email: Some(u.email.clone()),
            })
        });
        Ok(user)
    }

    async fn sign_out(&self, access_token: &str) -> BackendResult<()> {
        self.state.lock().await.tokens.remove(access_token);
        Ok(())
    }

    async fn select(&self, access_token: Option<&str>, query: &Query) -> BackendResult<Vec<Value>> {
        let state = self.state.lock().await;
        state.check_table(query.table())?;
        state.check_token(access_token)?;

        let mut rows: Vec<&Value> = state
            .tables
            .get(query.table())
            .map(|rows| rows.iter().collect())
            .unwrap_or_default();

        rows.retain(|row| {
            query
                .filters()
                .iter()
                .all(|(column, value)| field_matches(row.get(column), value))
        });

        if let Some((column, order)) = query.ordering() {
            rows.sort_by(|a, b| {
                let ord = compare(a.get(column), b.get(column));
                match order {
                    Order::Ascending => ord,
                    Order::Descending => ord.reverse(),
                }
            });
        }

        if let Some(limit) = query.row_limit() {
            rows.truncate(limit);
        }

        if query.is_single() && rows.len() != 1 {
            return Err(BackendError::Api {
                status: 406,
                message: format!(
                    "JSON object requested, {} rows returned",
                    rows.len()
                ),
            });
        }

        let columns = parse_columns(query.columns());
        Ok(rows.into_iter().map(|row| state.project(row, &columns)).collect())
    }

    async fn insert(
        &self,
        access_token: Option<&str>,
        table: &str,
        rows: Vec<Value>,
    ) -> BackendResult<()> {
        let mut state = self.state.lock().await;
        state.check_table(table)?;
        state.check_token(access_token)?;

        for row in rows {
            let Value::Object(mut fields) = row.clone() else {
                return Err(BackendError::Api {
                    status: 400,
                    message: "rows must be JSON objects".to_string(),
                });
            };
            state.inserts.push((table.to_string(), row));

            fields
                .entry("id")
                .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
            fields
                .entry("created_at")
                .or_insert_with(|| Value::String(chrono::Utc::now().to_rfc3339()));

            state
                .tables
                .entry(table.to_string())
                .or_default()
                .push(Value::Object(fields));
        }
        Ok(())
    }
}
