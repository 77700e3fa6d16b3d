use serde::Serialize;

use crate::config::TableConfig;
use crate::model::{NavigationEntry, QueryDefaults, Role};

/// Pages a dashboard can mount. Sidebar trees reference these and the
/// router turns each into a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardView {
    AdminAnalytics,
    AdminUsers,
    AdminParcels,
    SenderAnalytics,
    SenderParcels,
    ReceiverIncoming,
    ReceiverHistory,
}

impl DashboardView {
    /// Query defaults for table views, `None` for non-table pages
    pub fn table_defaults(&self, tables: &TableConfig) -> Option<QueryDefaults> {
        let base = QueryDefaults::default().with_limit(tables.default_limit);
        match self {
            DashboardView::AdminAnalytics | DashboardView::SenderAnalytics => None,
            DashboardView::AdminUsers => Some(
                base.with_filter("role", "all")
                    .with_filter("status", "all"),
            ),
            DashboardView::AdminParcels => Some(base.with_filter("status", "all")),
            DashboardView::SenderParcels | DashboardView::ReceiverIncoming => {
                Some(base.with_sort("-created_at"))
            }
            DashboardView::ReceiverHistory => Some(
                base.with_sort("-created_at")
                    .with_filter("status", "delivered"),
            ),
        }
    }
}

pub type SidebarItems = Vec<NavigationEntry<DashboardView>>;

pub fn admin_sidebar() -> SidebarItems {
    vec![
        NavigationEntry::group(
            "Dashboard",
            vec![NavigationEntry::leaf(
                "Analytics",
                "/admin/analytics",
                DashboardView::AdminAnalytics,
            )],
        ),
        NavigationEntry::group(
            "Management",
            vec![
                NavigationEntry::leaf("Users", "/admin/users", DashboardView::AdminUsers),
                NavigationEntry::leaf("Parcels", "/admin/parcels", DashboardView::AdminParcels),
            ],
        ),
    ]
}

pub fn sender_sidebar() -> SidebarItems {
    vec![
        NavigationEntry::group(
            "Dashboard",
            vec![NavigationEntry::leaf(
                "Analytics",
                "/sender/analytics",
                DashboardView::SenderAnalytics,
            )],
        ),
        NavigationEntry::group(
            "Parcels",
            vec![NavigationEntry::leaf(
                "My Parcels",
                "/sender/parcels",
                DashboardView::SenderParcels,
            )],
        ),
    ]
}

pub fn receiver_sidebar() -> SidebarItems {
    vec![NavigationEntry::group(
        "Parcels",
        vec![
            NavigationEntry::leaf(
                "Incoming",
                "/receiver/incoming",
                DashboardView::ReceiverIncoming,
            ),
            NavigationEntry::leaf(
                "Delivery History",
                "/receiver/history",
                DashboardView::ReceiverHistory,
            ),
        ],
    )]
}

pub fn sidebar_for(role: Role) -> SidebarItems {
    match role {
        Role::Admin => admin_sidebar(),
        Role::Sender => sender_sidebar(),
        Role::Receiver => receiver_sidebar(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::RouteTableBuilder;

    #[test]
    fn test_every_role_mounts_its_pages() {
        let builder = RouteTableBuilder::default();

        let admin: Vec<_> = builder
            .build(&admin_sidebar())
            .into_iter()
            .map(|route| route.path)
            .collect();
        assert_eq!(admin, vec!["analytics", "users", "parcels"]);

        assert_eq!(builder.build(&sender_sidebar()).len(), 2);
        assert_eq!(builder.build(&receiver_sidebar()).len(), 2);
    }

    #[test]
    fn test_sidebar_urls_carry_their_role_prefix() {
        let builder = RouteTableBuilder::default();
        for role in Role::ALL {
            for route in builder.build(&sidebar_for(role)) {
                assert!(!route.path.starts_with('/'), "{:?} {}", role, route.path);
            }
        }
    }

    #[test]
    fn test_table_defaults() {
        let tables = TableConfig { default_limit: 10 };

        assert!(DashboardView::AdminAnalytics.table_defaults(&tables).is_none());
        let users = DashboardView::AdminUsers.table_defaults(&tables).unwrap();
        assert_eq!(users.limit, 10);
        assert_eq!(users.filters.len(), 2);
    }
}
