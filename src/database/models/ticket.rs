use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: i64,
    pub customer: String,
    pub topic: String,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub customer: String,
    pub topic: String,
    pub contents: String,
}
