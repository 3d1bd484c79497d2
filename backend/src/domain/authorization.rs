//! Role authorisation policy.
//!
//! A pure `(caller, action) -> allow | deny` decision. The session check and
//! the role check are independent and applied in that order, so an
//! anonymous caller is always told to authenticate (401) and never told it
//! lacks a role (403).

use super::error::Error;
use super::role::Role;
use super::user::UserId;

/// An authenticated member as seen by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    pub user_id: UserId,
    pub role: Role,
}

/// Identity of whoever is invoking an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// No session, or a session naming a user that no longer exists.
    Anonymous,
    /// A signed-in member with their current role.
    Member(Member),
}

impl Caller {
    /// Build a caller for a signed-in member.
    #[must_use]
    pub const fn member(user_id: UserId, role: Role) -> Self {
        Self::Member(Member { user_id, role })
    }

    /// The member behind this caller, if any.
    #[must_use]
    pub const fn as_member(&self) -> Option<&Member> {
        match self {
            Self::Anonymous => None,
            Self::Member(member) => Some(member),
        }
    }
}

/// Every operation the portal exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ViewCurrentUser,
    Register,
    Login,
    Logout,
    ListAnnouncements,
    CreateAnnouncement,
    DeleteAnnouncement,
    SubmitApplication,
    ListApplications,
    TransitionApplication,
    DeleteApplication,
    ListTasks,
    CreateTask,
    DeleteTask,
    ReadSetting,
    UpdateSetting,
    AssignRole,
    ListUsers,
    ListRanks,
    ListRules,
}

const TASK_READERS: &[Role] = &[Role::Admin, Role::Recruit, Role::Police];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// What an action demands of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Anyone, signed in or not.
    Public,
    /// Any signed-in member.
    Authenticated,
    /// A signed-in member holding one of the listed roles.
    Roles(&'static [Role]),
}

impl Action {
    /// Requirement table for the portal.
    #[must_use]
    pub const fn requirement(self) -> Requirement {
        match self {
            Self::ViewCurrentUser
            | Self::Register
            | Self::Login
            | Self::ListAnnouncements
            | Self::ReadSetting => Requirement::Public,
            Self::Logout
            | Self::SubmitApplication
            | Self::ListApplications
            | Self::ListRanks
            | Self::ListRules => Requirement::Authenticated,
            Self::CreateAnnouncement
            | Self::DeleteAnnouncement
            | Self::TransitionApplication
            | Self::DeleteApplication
            | Self::UpdateSetting
            | Self::AssignRole => Requirement::Roles(Role::REVIEWERS),
            Self::ListTasks => Requirement::Roles(TASK_READERS),
            Self::CreateTask | Self::DeleteTask | Self::ListUsers => Requirement::Roles(ADMIN_ONLY),
        }
    }

    const fn forbidden_message(self) -> &'static str {
        match self {
            Self::ListTasks => "Access denied",
            Self::CreateTask | Self::DeleteTask => "Admin only",
            _ => "Forbidden",
        }
    }
}

/// Reason an action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No session; maps to 401.
    Unauthenticated,
    /// Session present but the role is not allowed; maps to 403.
    Forbidden(Action),
}

impl From<Denial> for Error {
    fn from(value: Denial) -> Self {
        match value {
            Denial::Unauthenticated => Self::unauthorized("Login required"),
            Denial::Forbidden(action) => Self::forbidden(action.forbidden_message()),
        }
    }
}

/// Decide whether `caller` may perform `action`.
///
/// # Errors
/// Returns [`Denial::Unauthenticated`] when a session is required but
/// absent, and [`Denial::Forbidden`] when the member's role is not allowed.
///
/// # Examples
/// ```
/// use portal::domain::{Action, Caller, Denial, Role, UserId, authorize};
///
/// let cadet = Caller::member(UserId::from_stored(3), Role::Citizen);
/// assert_eq!(authorize(&cadet, Action::ListApplications), Ok(()));
/// assert_eq!(authorize(&Caller::Anonymous, Action::AssignRole), Err(Denial::Unauthenticated));
/// ```
pub fn authorize(caller: &Caller, action: Action) -> Result<(), Denial> {
    match (action.requirement(), caller) {
        (Requirement::Public, _) => Ok(()),
        (_, Caller::Anonymous) => Err(Denial::Unauthenticated),
        (Requirement::Authenticated, Caller::Member(_)) => Ok(()),
        (Requirement::Roles(allowed), Caller::Member(member)) => {
            if allowed.contains(&member.role) {
                Ok(())
            } else {
                Err(Denial::Forbidden(action))
            }
        }
    }
}

/// Authorise a member-only action and hand back the member.
///
/// # Errors
/// As [`authorize`]; anonymous callers always yield
/// [`Denial::Unauthenticated`].
pub fn authorize_member(caller: &Caller, action: Action) -> Result<Member, Denial> {
    authorize(caller, action)?;
    caller.as_member().copied().ok_or(Denial::Unauthenticated)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    const REVIEWER_ACTIONS: [Action; 6] = [
        Action::CreateAnnouncement,
        Action::DeleteAnnouncement,
        Action::TransitionApplication,
        Action::DeleteApplication,
        Action::UpdateSetting,
        Action::AssignRole,
    ];

    fn caller(role: Role) -> Caller {
        Caller::member(UserId::from_stored(1), role)
    }

    #[rstest]
    fn anonymous_callers_are_never_forbidden() {
        for action in REVIEWER_ACTIONS
            .into_iter()
            .chain([Action::ListTasks, Action::CreateTask, Action::ListUsers])
        {
            assert_eq!(
                authorize(&Caller::Anonymous, action),
                Err(Denial::Unauthenticated),
                "{action:?}"
            );
        }
    }

    #[rstest]
    #[case(Action::ViewCurrentUser)]
    #[case(Action::Register)]
    #[case(Action::Login)]
    #[case(Action::ListAnnouncements)]
    #[case(Action::ReadSetting)]
    fn public_actions_allow_anonymous(#[case] action: Action) {
        assert_eq!(authorize(&Caller::Anonymous, action), Ok(()));
    }

    #[rstest]
    #[case(Role::Admin, true)]
    #[case(Role::Ftp, true)]
    #[case(Role::Fto, true)]
    #[case(Role::Police, false)]
    #[case(Role::Recruit, false)]
    #[case(Role::Citizen, false)]
    fn reviewer_actions_follow_reviewer_set(#[case] role: Role, #[case] allowed: bool) {
        for action in REVIEWER_ACTIONS {
            let expected = if allowed {
                Ok(())
            } else {
                Err(Denial::Forbidden(action))
            };
            assert_eq!(authorize(&caller(role), action), expected, "{action:?}");
        }
    }

    #[rstest]
    #[case(Role::Admin, true)]
    #[case(Role::Recruit, true)]
    #[case(Role::Police, true)]
    #[case(Role::Ftp, false)]
    #[case(Role::Fto, false)]
    #[case(Role::Citizen, false)]
    fn task_board_readers(#[case] role: Role, #[case] allowed: bool) {
        assert_eq!(authorize(&caller(role), Action::ListTasks).is_ok(), allowed);
    }

    #[rstest]
    #[case(Action::CreateTask)]
    #[case(Action::DeleteTask)]
    #[case(Action::ListUsers)]
    fn admin_only_actions_reject_other_reviewers(#[case] action: Action) {
        assert_eq!(authorize(&caller(Role::Admin), action), Ok(()));
        assert_eq!(
            authorize(&caller(Role::Ftp), action),
            Err(Denial::Forbidden(action))
        );
    }

    #[rstest]
    #[case(Denial::Unauthenticated, "Login required")]
    #[case(Denial::Forbidden(Action::ListTasks), "Access denied")]
    #[case(Denial::Forbidden(Action::CreateTask), "Admin only")]
    #[case(Denial::Forbidden(Action::AssignRole), "Forbidden")]
    fn denials_map_to_messages(#[case] denial: Denial, #[case] message: &str) {
        assert_eq!(Error::from(denial).message(), message);
    }

    #[rstest]
    fn authorize_member_returns_the_member() {
        let member = authorize_member(&caller(Role::Citizen), Action::SubmitApplication)
            .expect("authenticated member");
        assert_eq!(member.role, Role::Citizen);
    }
}
