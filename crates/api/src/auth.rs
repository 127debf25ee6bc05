// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use voucher_audit::Actor;

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
/// Roles apply only to actors (back-office operators), never to
/// shoppers, who interact exclusively through the public validation
/// endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Platform administrator: unrestricted voucher authority.
    ///
    /// Platform administrators may manage vouchers in any organization
    /// and are the only actors who may manage platform-global vouchers
    /// (those with no owning organization).
    PlatformAdmin,
    /// Organization manager: voucher authority within managed
    /// organizations only.
    OrgManager,
}

/// An authenticated actor with an associated role.
///
/// This represents a back-office operator who has been authenticated
/// and has permission to perform certain actions based on their role
/// and organization scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The display name of this actor, when known.
    pub display_name: Option<String>,
    /// The role assigned to this actor.
    pub role: Role,
    /// The organizations this actor manages. Ignored for platform
    /// administrators.
    pub managed_organization_ids: Vec<String>,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    /// * `managed_organization_ids` - The organizations this actor manages
    #[must_use]
    pub const fn new(id: String, role: Role, managed_organization_ids: Vec<String>) -> Self {
        Self {
            id,
            display_name: None,
            role,
            managed_organization_ids,
        }
    }

    /// Whether this actor may manage vouchers in the given organization
    /// scope.
    ///
    /// A scope of `None` means platform-global, which only platform
    /// administrators may touch.
    #[must_use]
    pub fn can_manage_organization(&self, organization_id: Option<&str>) -> bool {
        match self.role {
            Role::PlatformAdmin => true,
            Role::OrgManager => organization_id.is_some_and(|org| {
                self.managed_organization_ids
                    .iter()
                    .any(|managed| managed == org)
            }),
        }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit entries to attribute actions
    /// to the authenticated operator.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type: String = match self.role {
            Role::PlatformAdmin => String::from("admin"),
            Role::OrgManager => String::from("manager"),
        };
        Actor::new(self.id.clone(), actor_type)
    }
}

/// Authorization service for enforcing role-based access control.
///
/// This service determines whether an authenticated actor has
/// permission to perform a specific action based on their role and
/// organization scope.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor is authorized to manage vouchers in the given
    /// organization scope.
    ///
    /// Platform administrators may manage any scope. Organization
    /// managers may manage only vouchers owned by an organization they
    /// manage; platform-global vouchers require the administrator role.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `organization_id` - The organization scope of the voucher
    /// * `action` - The action being attempted, for error reporting
    ///
    /// # Errors
    ///
    /// Returns an error if the actor may not manage this scope.
    pub fn authorize_manage_vouchers(
        actor: &AuthenticatedActor,
        organization_id: Option<&str>,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.can_manage_organization(organization_id) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: match organization_id {
                    Some(_) => String::from("OrgManager for this organization"),
                    None => String::from("PlatformAdmin"),
                },
            })
        }
    }

    /// Checks if an actor is authorized to read the audit log for the
    /// given organization scope.
    ///
    /// The same scoping rules apply as for voucher management; reading
    /// the unscoped (platform-wide) log requires the administrator
    /// role.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `organization_id` - The organization scope being read
    ///
    /// # Errors
    ///
    /// Returns an error if the actor may not read this scope.
    pub fn authorize_view_audit_log(
        actor: &AuthenticatedActor,
        organization_id: Option<&str>,
    ) -> Result<(), AuthError> {
        Self::authorize_manage_vouchers(actor, organization_id, "view_audit_log")
    }
}
