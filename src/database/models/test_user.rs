use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

/// Standalone one-to-one pair, kept apart from the main schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TestUser {
    pub id: i32,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Test {
    pub id: i32,
    pub code: Option<String>,
    pub user_id: i32,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TestUserWithTest {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub user: TestUser,
    pub test: Option<Json<Test>>,
}
