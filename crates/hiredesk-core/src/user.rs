//! The signed-in user and the role that gates what each screen offers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
  #[serde(alias = "ADMIN")]
  Admin,
  /// Human resources.
  #[serde(alias = "RH")]
  Rh,
  #[serde(alias = "MANAGER")]
  Manager,
  #[serde(alias = "CANDIDATE")]
  Candidate,
  #[serde(other)]
  Unknown,
}

impl UserRole {
  /// Roles allowed to edit and delete candidates.
  pub fn can_manage_candidates(self) -> bool {
    matches!(self, Self::Admin | Self::Rh | Self::Manager)
  }

  pub fn is_candidate(self) -> bool { self == Self::Candidate }

  pub fn label(self) -> &'static str {
    match self {
      Self::Admin => "admin",
      Self::Rh => "hr",
      Self::Manager => "manager",
      Self::Candidate => "candidate",
      Self::Unknown => "unknown",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSummary {
  pub id:   i64,
  pub name: String,
}

/// One organization the user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
  pub organization_id: i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub role:            Option<UserRole>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub organization:    Option<OrganizationSummary>,
}

/// Body of `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
  pub id:                 i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email:              Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub first_name:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_name:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub role:               Option<UserRole>,
  #[serde(default)]
  pub user_organizations: Vec<Membership>,
}

impl CurrentUser {
  /// The organization every scoped request uses: the first membership.
  pub fn primary_organization(&self) -> Option<i64> {
    self.user_organizations.first().map(|m| m.organization_id)
  }

  pub fn organization_name(&self) -> Option<&str> {
    self
      .user_organizations
      .first()
      .and_then(|m| m.organization.as_ref())
      .map(|o| o.name.as_str())
  }

  /// Role within the primary organization, else the account-level role.
  pub fn effective_role(&self) -> Option<UserRole> {
    self
      .user_organizations
      .first()
      .and_then(|m| m.role)
      .or(self.role)
  }

  pub fn display_name(&self) -> String {
    match (&self.first_name, &self.last_name) {
      (Some(f), Some(l)) => format!("{f} {l}"),
      (Some(n), None) | (None, Some(n)) => n.clone(),
      (None, None) => self
        .email
        .clone()
        .unwrap_or_else(|| format!("user #{}", self.id)),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn membership_role_wins_over_account_role() {
    let u: CurrentUser = serde_json::from_value(json!({
      "id": 4,
      "email": "alice@acme.io",
      "role": "candidate",
      "userOrganizations": [
        { "organizationId": 3, "role": "rh", "organization": { "id": 3, "name": "Acme" } },
        { "organizationId": 8, "role": "admin" }
      ]
    }))
    .unwrap();
    assert_eq!(u.primary_organization(), Some(3));
    assert_eq!(u.organization_name(), Some("Acme"));
    assert_eq!(u.effective_role(), Some(UserRole::Rh));
    assert_eq!(u.display_name(), "alice@acme.io");
  }

  #[test]
  fn no_membership_falls_back_to_account_role() {
    let u: CurrentUser =
      serde_json::from_value(json!({ "id": 9, "role": "CANDIDATE", "firstName": "Jeanne" }))
        .unwrap();
    assert_eq!(u.primary_organization(), None);
    assert_eq!(u.effective_role(), Some(UserRole::Candidate));
    assert_eq!(u.display_name(), "Jeanne");
  }

  #[test]
  fn unknown_roles_are_tolerated() {
    let role: UserRole = serde_json::from_value(json!("auditor")).unwrap();
    assert_eq!(role, UserRole::Unknown);
    assert!(!role.can_manage_candidates());
    assert!(UserRole::Manager.can_manage_candidates());
    assert!(!UserRole::Candidate.can_manage_candidates());
  }
}
