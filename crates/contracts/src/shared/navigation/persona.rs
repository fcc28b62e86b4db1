//! Persona context - read-only identity descriptor for flag evaluation.

use serde::{Deserialize, Serialize};

/// Роль пользователя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Compras,
    Finanzas,
    Ventas,
    Logistica,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Compras,
        Role::Finanzas,
        Role::Ventas,
        Role::Logistica,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administración",
            Role::Compras => "Compras",
            Role::Finanzas => "Finanzas",
            Role::Ventas => "Ventas",
            Role::Logistica => "Logística",
        }
    }
}

/// Identity passed explicitly into every flag evaluation and resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonaContext {
    pub user_id: String,
    pub role: Role,
    pub tenant: String,
}

impl PersonaContext {
    pub fn new(user_id: impl Into<String>, role: Role, tenant: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            tenant: tenant.into(),
        }
    }

    /// Tenants enrolled in early access are named `beta-*`.
    pub fn is_beta_tenant(&self) -> bool {
        self.tenant.starts_with("beta-")
    }
}

/// Варианты главного дашборда
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardVariant {
    Executive,
    Operations,
    Finance,
    Sales,
}

pub fn select_dashboard_variant(ctx: &PersonaContext) -> DashboardVariant {
    match ctx.role {
        Role::Admin => DashboardVariant::Executive,
        Role::Compras | Role::Logistica => DashboardVariant::Operations,
        Role::Finanzas => DashboardVariant::Finance,
        Role::Ventas => DashboardVariant::Sales,
    }
}
