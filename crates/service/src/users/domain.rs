use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// Profile as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Partial profile update; an absent field leaves the stored value as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ProfilePatch {
    pub fn apply_to(&self, profile: &mut UserProfile) {
        if let Some(email) = &self.email {
            profile.email = Some(email.clone());
        }
        if let Some(name) = &self.name {
            profile.name = Some(name.clone());
        }
    }
}

/// Demo sign-in request. The password is checked for presence only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoLoginInput {
    pub email: String,
    pub password: String,
}
