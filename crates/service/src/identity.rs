use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity assigned by the identity provider.
pub type UserId = Uuid;

/// Who is making a request. Anonymous callers carry no id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller(Option<UserId>);

impl Caller {
    pub fn anonymous() -> Self { Self(None) }

    pub fn user(id: UserId) -> Self { Self(Some(id)) }

    pub fn id(&self) -> Option<UserId> { self.0 }

    pub fn is_authenticated(&self) -> bool { self.0.is_some() }
}

impl From<Option<UserId>> for Caller {
    fn from(id: Option<UserId>) -> Self { Self(id) }
}
