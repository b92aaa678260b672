use crate::dal::model::statsfm::StatsfmUser;

use super::role_map::{is_pronoun_role, PronounRole};

#[derive(Debug, PartialEq, Eq)]
pub enum Reconciliation {
    /// Profile missing or hidden by privacy settings.
    PrivacyRestricted,
    /// Profile readable but no pronouns set.
    PronounsUnset,
    AlreadyAssigned(PronounRole),
    /// `roles` is the member's complete new role list.
    Assign {
        role: PronounRole,
        roles: Vec<String>,
    },
}

/// Decide which pronoun role the member should hold and whether their role list
/// has to change. Only `Assign` requires a call to Discord.
pub fn reconcile(current_roles: &[String], user: Option<&StatsfmUser>) -> Reconciliation {
    let Some(profile) = user.and_then(|u| u.profile.as_ref()) else {
        return Reconciliation::PrivacyRestricted;
    };

    let pronouns = match profile.pronouns.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Reconciliation::PronounsUnset,
    };

    let role = PronounRole::from_pronouns(pronouns);
    let role_id = role.role_id();

    if current_roles.iter().any(|r| r == role_id) {
        return Reconciliation::AlreadyAssigned(role);
    }

    let mut roles: Vec<String> = current_roles
        .iter()
        .filter(|r| !is_pronoun_role(r))
        .cloned()
        .collect();
    roles.push(role_id.to_string());

    Reconciliation::Assign { role, roles }
}
