//! Membership roles.
//!
//! The role is the sole authorisation axis. Reviewers (admin, ftp, fto)
//! manage applications, settings and role assignment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role held by a portal member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Default role for newly registered accounts.
    #[default]
    Citizen,
    /// Accepted academy recruit.
    Recruit,
    /// Serving police member.
    Police,
    /// Field training programme staff.
    Ftp,
    /// Field training officer.
    Fto,
    /// Portal administrator.
    Admin,
}

/// Raised when a role name is not one of the recognised values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    /// Every recognised role, in seniority order.
    pub const ALL: [Self; 6] = [
        Self::Citizen,
        Self::Recruit,
        Self::Police,
        Self::Ftp,
        Self::Fto,
        Self::Admin,
    ];

    /// Roles allowed to review applications and manage settings.
    pub const REVIEWERS: &'static [Self] = &[Self::Admin, Self::Ftp, Self::Fto];

    /// Stable lowercase name used in storage and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Recruit => "recruit",
            Self::Police => "police",
            Self::Ftp => "ftp",
            Self::Fto => "fto",
            Self::Admin => "admin",
        }
    }

    /// Whether the role is one of [`Role::REVIEWERS`].
    #[must_use]
    pub fn is_reviewer(self) -> bool {
        Self::REVIEWERS.contains(&self)
    }

    /// Members already holding a force role cannot sit the police quiz.
    #[must_use]
    pub const fn may_take_police_quiz(self) -> bool {
        !matches!(self, Self::Police | Self::Recruit | Self::Ftp | Self::Fto)
    }

    /// Admins and serving police do not use the academy form.
    #[must_use]
    pub const fn may_use_academy_form(self) -> bool {
        !matches!(self, Self::Admin | Self::Police)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| UnknownRole(value.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("citizen", Role::Citizen)]
    #[case("recruit", Role::Recruit)]
    #[case("police", Role::Police)]
    #[case("ftp", Role::Ftp)]
    #[case("fto", Role::Fto)]
    #[case("admin", Role::Admin)]
    fn parses_recognised_names(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>(), Ok(expected));
        assert_eq!(expected.to_string(), raw);
    }

    #[rstest]
    #[case("Admin")]
    #[case("superuser")]
    #[case("")]
    fn rejects_unrecognised_names(#[case] raw: &str) {
        assert_eq!(raw.parse::<Role>(), Err(UnknownRole(raw.to_owned())));
    }

    #[rstest]
    #[case(Role::Admin, true)]
    #[case(Role::Ftp, true)]
    #[case(Role::Fto, true)]
    #[case(Role::Police, false)]
    #[case(Role::Recruit, false)]
    #[case(Role::Citizen, false)]
    fn reviewer_set_is_admin_ftp_fto(#[case] role: Role, #[case] reviewer: bool) {
        assert_eq!(role.is_reviewer(), reviewer);
    }

    #[rstest]
    fn only_citizens_and_admins_may_take_police_quiz() {
        let eligible: Vec<Role> = Role::ALL
            .into_iter()
            .filter(|role| role.may_take_police_quiz())
            .collect();
        assert_eq!(eligible, vec![Role::Citizen, Role::Admin]);
    }

    #[rstest]
    fn defaults_to_citizen() {
        assert_eq!(Role::default(), Role::Citizen);
    }
}
