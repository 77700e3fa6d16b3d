use serde::{Deserialize, Serialize};

/// Sentinel url for a sidebar header that is not itself navigable
pub const GROUP_URL: &str = "#";

/// Dashboard a route belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Sender,
    Receiver,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Sender, Role::Receiver];

    /// Absolute path segment identifying this role's dashboard, e.g. `/admin/`
    pub fn prefix(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/",
            Role::Sender => "/sender/",
            Role::Receiver => "/receiver/",
        }
    }

    /// Mount point for the role's nested router, e.g. `/admin`
    pub fn mount_point(&self) -> &'static str {
        self.prefix().trim_end_matches('/')
    }
}

/// One sidebar entry. Leaves carry a `view`, groups carry `children`.
///
/// The view is opaque to navigation code and never serialized, so a tree
/// can be sent to a client as plain titles and urls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = ""))]
pub struct NavigationEntry<V> {
    pub title: String,
    pub url: String,
    #[serde(skip)]
    pub view: Option<V>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavigationEntry<V>>,
}

impl<V> NavigationEntry<V> {
    pub fn leaf(title: impl Into<String>, url: impl Into<String>, view: V) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            view: Some(view),
            children: Vec::new(),
        }
    }

    pub fn group(title: impl Into<String>, children: Vec<NavigationEntry<V>>) -> Self {
        Self {
            title: title.into(),
            url: GROUP_URL.to_string(),
            view: None,
            children,
        }
    }

    pub fn is_header(&self) -> bool {
        self.url == GROUP_URL
    }
}

/// A path/view pair ready to be mounted on a router
#[derive(Debug, Clone, PartialEq)]
pub struct MountedRoute<V> {
    /// Router-relative path with the role prefix stripped
    pub path: String,
    pub view: V,
}

impl<V> MountedRoute<V> {
    pub fn new(path: impl Into<String>, view: V) -> Self {
        Self {
            path: path.into(),
            view,
        }
    }

    /// Path as a router expects it, always starting with `/`
    pub fn router_path(&self) -> String {
        if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        }
    }
}
