use serde::{Deserialize, Serialize};

/// Роль вызывающей стороны
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Customer,
    Admin,
}

impl ActorRole {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "customer" => Some(ActorRole::Customer),
            "admin" => Some(ActorRole::Admin),
            _ => None,
        }
    }
}

/// Идентичность вызывающей стороны. Приходит из внешней сессии,
/// передаётся в каждую операцию явно.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub role: ActorRole,
}

impl Actor {
    pub fn customer(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: ActorRole::Customer,
        }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: ActorRole::Admin,
        }
    }

    /// Системный пользователь для служебных операций (начальные данные)
    pub fn system() -> Self {
        Self::admin("system")
    }

    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }
}
