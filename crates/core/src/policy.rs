//! Role-to-permission policy.
//!
//! Every authorization decision in the API goes through [`role_permits`] or
//! [`can_act_on_farm`]. Route extractors and handlers never compare role
//! names themselves.

use serde::Serialize;

use crate::roles::Role;

/// Capabilities that are granted purely by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Create, edit and publish training modules.
    ManageTraining,
    /// Broadcast and deactivate alerts.
    BroadcastAlerts,
    /// Move completed assessments to `reviewed`.
    ReviewAssessments,
    /// Read every farm, not only owned ones.
    ViewAllFarms,
    /// Read cross-farm aggregate statistics.
    ViewAnalytics,
}

impl Permission {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ManageTraining => "manage_training",
            Self::BroadcastAlerts => "broadcast_alerts",
            Self::ReviewAssessments => "review_assessments",
            Self::ViewAllFarms => "view_all_farms",
            Self::ViewAnalytics => "view_analytics",
        }
    }
}

/// Actions on a single farm, decided by role and ownership together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FarmAction {
    View,
    Edit,
    Assess,
    RecordCompliance,
}

/// Which dashboard a role lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardKind {
    Farmer,
    Veterinarian,
    ExtensionWorker,
    Regulator,
    Researcher,
}

/// Whether `role` holds `permission`.
pub fn role_permits(role: Role, permission: Permission) -> bool {
    use Permission::*;
    use Role::*;

    match permission {
        ManageTraining => matches!(role, ExtensionWorker | Regulator),
        BroadcastAlerts => matches!(role, Regulator),
        ReviewAssessments => matches!(role, Veterinarian | Regulator),
        ViewAllFarms => matches!(
            role,
            Veterinarian | ExtensionWorker | Regulator | Researcher
        ),
        ViewAnalytics => matches!(role, Regulator | Researcher),
    }
}

/// Whether a user with `role` may perform `action` on a farm.
///
/// `is_owner` is true when the farm's `owner_id` equals the caller.
pub fn can_act_on_farm(role: Role, is_owner: bool, action: FarmAction) -> bool {
    if is_owner {
        return true;
    }
    match action {
        FarmAction::View => role_permits(role, Permission::ViewAllFarms),
        FarmAction::Edit => false,
        FarmAction::Assess => matches!(role, Role::Veterinarian | Role::ExtensionWorker),
        FarmAction::RecordCompliance => matches!(
            role,
            Role::Veterinarian | Role::ExtensionWorker | Role::Regulator
        ),
    }
}

/// Dashboard routing: one dashboard per role.
pub fn dashboard_for(role: Role) -> DashboardKind {
    match role {
        Role::Farmer => DashboardKind::Farmer,
        Role::Veterinarian => DashboardKind::Veterinarian,
        Role::ExtensionWorker => DashboardKind::ExtensionWorker,
        Role::Regulator => DashboardKind::Regulator,
        Role::Researcher => DashboardKind::Researcher,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: [Role; 5] = [
        Role::Farmer,
        Role::Veterinarian,
        Role::ExtensionWorker,
        Role::Regulator,
        Role::Researcher,
    ];

    fn holders(permission: Permission) -> Vec<Role> {
        ALL_ROLES
            .into_iter()
            .filter(|r| role_permits(*r, permission))
            .collect()
    }

    #[test]
    fn training_management_is_extension_worker_and_regulator() {
        assert_eq!(
            holders(Permission::ManageTraining),
            vec![Role::ExtensionWorker, Role::Regulator]
        );
    }

    #[test]
    fn only_regulators_broadcast_alerts() {
        assert_eq!(holders(Permission::BroadcastAlerts), vec![Role::Regulator]);
    }

    #[test]
    fn aggregate_dashboards_go_to_analytics_roles() {
        for role in ALL_ROLES {
            let aggregate = matches!(
                dashboard_for(role),
                DashboardKind::Regulator | DashboardKind::Researcher
            );
            assert_eq!(aggregate, role_permits(role, Permission::ViewAnalytics));
        }
    }

    #[test]
    fn farmers_hold_no_global_permission() {
        for p in [
            Permission::ManageTraining,
            Permission::BroadcastAlerts,
            Permission::ReviewAssessments,
            Permission::ViewAllFarms,
            Permission::ViewAnalytics,
        ] {
            assert!(!role_permits(Role::Farmer, p), "farmer must not hold {}", p.name());
        }
    }

    #[test]
    fn owner_may_do_everything_on_own_farm() {
        for action in [
            FarmAction::View,
            FarmAction::Edit,
            FarmAction::Assess,
            FarmAction::RecordCompliance,
        ] {
            assert!(can_act_on_farm(Role::Farmer, true, action));
        }
    }

    #[test]
    fn non_owner_farmer_cannot_see_other_farms() {
        assert!(!can_act_on_farm(Role::Farmer, false, FarmAction::View));
        assert!(!can_act_on_farm(Role::Farmer, false, FarmAction::Assess));
    }

    #[test]
    fn only_owner_edits_farm() {
        for role in ALL_ROLES {
            assert!(!can_act_on_farm(role, false, FarmAction::Edit));
        }
    }

    #[test]
    fn researcher_reads_but_does_not_assess() {
        assert!(can_act_on_farm(Role::Researcher, false, FarmAction::View));
        assert!(!can_act_on_farm(Role::Researcher, false, FarmAction::Assess));
        assert!(!can_act_on_farm(
            Role::Researcher,
            false,
            FarmAction::RecordCompliance
        ));
    }

    #[test]
    fn veterinarian_assesses_client_farms() {
        assert!(can_act_on_farm(Role::Veterinarian, false, FarmAction::Assess));
        assert!(can_act_on_farm(
            Role::Veterinarian,
            false,
            FarmAction::RecordCompliance
        ));
    }

    #[test]
    fn each_role_has_its_own_dashboard() {
        assert_eq!(dashboard_for(Role::Farmer), DashboardKind::Farmer);
        assert_eq!(dashboard_for(Role::Regulator), DashboardKind::Regulator);
        assert_eq!(
            dashboard_for(Role::ExtensionWorker),
            DashboardKind::ExtensionWorker
        );
    }
}
