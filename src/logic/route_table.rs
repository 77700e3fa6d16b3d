use crate::model::{MountedRoute, NavigationEntry, Role};

/// Flattens sidebar trees into router-mountable routes.
///
/// Each leaf url loses the first matching role prefix, so `/admin/users`
/// mounts as `users` under the admin router. Urls that match no prefix
/// pass through unchanged.
#[derive(Debug, Clone)]
pub struct RouteTableBuilder {
    prefixes: Vec<String>,
}

impl Default for RouteTableBuilder {
    fn default() -> Self {
        Self::with_prefixes(Role::ALL.iter().map(|role| role.prefix()))
    }
}

impl RouteTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefixes<I, P>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn strip_prefix<'a>(&self, url: &'a str) -> &'a str {
        self.prefixes
            .iter()
            .find_map(|prefix| url.strip_prefix(prefix.as_str()))
            .unwrap_or(url)
    }

    /// Depth-first: an entry's own view comes before its children's.
    pub fn build<V: Clone>(&self, entries: &[NavigationEntry<V>]) -> Vec<MountedRoute<V>> {
        let mut routes = Vec::new();
        for entry in entries {
            self.collect(entry, &mut routes);
        }
        routes
    }

    fn collect<V: Clone>(&self, entry: &NavigationEntry<V>, routes: &mut Vec<MountedRoute<V>>) {
        if let Some(view) = &entry.view {
            if !entry.is_header() {
                routes.push(MountedRoute::new(self.strip_prefix(&entry.url), view.clone()));
            }
        }

        for child in &entry.children {
            self.collect(child, routes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths<V>(routes: &[MountedRoute<V>]) -> Vec<&str> {
        routes.iter().map(|route| route.path.as_str()).collect()
    }

    fn admin_tree() -> Vec<NavigationEntry<&'static str>> {
        vec![
            NavigationEntry::group(
                "Dashboard",
                vec![NavigationEntry::leaf("Analytics", "/admin/analytics", "analytics")],
            ),
            NavigationEntry::group(
                "Management",
                vec![
                    NavigationEntry::leaf("Users", "/admin/users", "users"),
                    NavigationEntry::leaf("Parcels", "/admin/parcels", "parcels"),
                ],
            ),
        ]
    }

    #[test]
    fn test_strips_role_prefix() {
        let routes = RouteTableBuilder::default().build(&admin_tree());

        assert_eq!(paths(&routes), vec!["analytics", "users", "parcels"]);
        assert_eq!(routes[1].view, "users");
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = RouteTableBuilder::default();
        let tree = admin_tree();

        assert_eq!(builder.build(&tree), builder.build(&tree));
    }

    #[test]
    fn test_header_with_view_is_not_routed() {
        let tree = vec![NavigationEntry {
            title: "Header".to_string(),
            url: "#".to_string(),
            view: Some("ignored"),
            children: vec![],
        }];

        assert!(RouteTableBuilder::default().build(&tree).is_empty());
    }

    #[test]
    fn test_group_contributes_only_children() {
        let tree = vec![NavigationEntry::group(
            "Parcels",
            vec![
                NavigationEntry::leaf("Sent", "/sender/parcels", 1),
                NavigationEntry::leaf("Stats", "/sender/analytics", 2),
            ],
        )];

        let routes = RouteTableBuilder::default().build(&tree);
        assert_eq!(routes.len(), 2);
        assert_eq!(paths(&routes), vec!["parcels", "analytics"]);
    }

    #[test]
    fn test_parent_view_precedes_children() {
        let tree = vec![NavigationEntry {
            title: "Overview".to_string(),
            url: "/receiver/overview".to_string(),
            view: Some("overview"),
            children: vec![NavigationEntry::leaf("History", "/receiver/history", "history")],
        }];

        let routes = RouteTableBuilder::default().build(&tree);
        assert_eq!(paths(&routes), vec!["overview", "history"]);
    }

    #[test]
    fn test_unknown_prefix_passes_through() {
        let tree = vec![NavigationEntry::leaf("About", "/about", ())];

        let routes = RouteTableBuilder::default().build(&tree);
        assert_eq!(paths(&routes), vec!["/about"]);
    }

    #[test]
    fn test_malformed_entry_yields_nothing() {
        let tree: Vec<NavigationEntry<()>> = vec![NavigationEntry {
            title: "Empty".to_string(),
            url: "/admin/empty".to_string(),
            view: None,
            children: vec![],
        }];

        assert!(RouteTableBuilder::default().build(&tree).is_empty());
    }

    #[test]
    fn test_nested_groups_flatten_depth_first() {
        let tree = vec![
            NavigationEntry::group(
                "Outer",
                vec![
                    NavigationEntry::group(
                        "Inner",
                        vec![NavigationEntry::leaf("Deep", "/admin/deep", 'a')],
                    ),
                    NavigationEntry::leaf("Shallow", "/admin/shallow", 'b'),
                ],
            ),
            NavigationEntry::leaf("Last", "/admin/last", 'c'),
        ];

        let routes = RouteTableBuilder::default().build(&tree);
        assert_eq!(paths(&routes), vec!["deep", "shallow", "last"]);
    }

    #[test]
    fn test_custom_prefixes() {
        let builder = RouteTableBuilder::with_prefixes(["/ops/"]);
        let tree = vec![
            NavigationEntry::leaf("Queue", "/ops/queue", ()),
            NavigationEntry::leaf("Users", "/admin/users", ()),
        ];

        assert_eq!(paths(&builder.build(&tree)), vec!["queue", "/admin/users"]);
    }
}
