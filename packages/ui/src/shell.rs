//! Navigation rules shared by every platform's router.
//!
//! Views never name router types; they emit a [`NavTarget`] and the platform
//! crate maps it onto its route enum. Gating is decided here from the
//! presence of a session alone. Whether the token is still valid is only
//! learned from the backend.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavTarget {
    Home,
    Login,
    Register,
    AddProduct,
    Product(u64),
    Notifications,
    Profile,
}

impl NavTarget {
    pub fn requires_session(self) -> bool {
        matches!(
            self,
            NavTarget::AddProduct | NavTarget::Notifications | NavTarget::Profile
        )
    }

    pub fn anonymous_only(self) -> bool {
        matches!(self, NavTarget::Login | NavTarget::Register)
    }

    pub fn path(self) -> String {
        match self {
            NavTarget::Home => "/".to_string(),
            NavTarget::Login => "/login".to_string(),
            NavTarget::Register => "/register".to_string(),
            NavTarget::AddProduct => "/add-product".to_string(),
            NavTarget::Product(id) => format!("/product/{id}"),
            NavTarget::Notifications => "/notifications".to_string(),
            NavTarget::Profile => "/profile".to_string(),
        }
    }

    /// Where a visitor actually lands when asking for `self`.
    pub fn access(self, authenticated: bool) -> Access {
        if self.requires_session() && !authenticated {
            Access::Redirect(NavTarget::Login)
        } else if self.anonymous_only() && authenticated {
            Access::Redirect(NavTarget::Home)
        } else {
            Access::Allow
        }
    }
}

impl fmt::Display for NavTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(NavTarget),
}

/// A navbar entry. `target == None` is the logout button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub target: Option<NavTarget>,
}

const fn link(label: &'static str, target: NavTarget) -> NavItem {
    NavItem {
        label,
        target: Some(target),
    }
}

pub fn nav_items(authenticated: bool) -> Vec<NavItem> {
    if authenticated {
        vec![
            link("Home", NavTarget::Home),
            link("Add Product", NavTarget::AddProduct),
            link("Notifications", NavTarget::Notifications),
            link("Profile", NavTarget::Profile),
            NavItem {
                label: "Logout",
                target: None,
            },
        ]
    } else {
        vec![
            link("Home", NavTarget::Home),
            link("Login", NavTarget::Login),
            link("Register", NavTarget::Register),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(authenticated: bool) -> Vec<&'static str> {
        nav_items(authenticated).iter().map(|i| i.label).collect()
    }

    #[test]
    fn test_affordances() {
        assert_eq!(labels(false), vec!["Home", "Login", "Register"]);
        assert_eq!(
            labels(true),
            vec!["Home", "Add Product", "Notifications", "Profile", "Logout"]
        );
    }

    #[test]
    fn test_gating() {
        assert_eq!(
            NavTarget::AddProduct.access(false),
            Access::Redirect(NavTarget::Login)
        );
        assert_eq!(NavTarget::AddProduct.access(true), Access::Allow);
        assert_eq!(
            NavTarget::Register.access(true),
            Access::Redirect(NavTarget::Home)
        );
        assert_eq!(NavTarget::Product(4).access(false), Access::Allow);
        assert_eq!(NavTarget::Home.access(true), Access::Allow);
    }

    #[test]
    fn test_paths() {
        assert_eq!(NavTarget::Product(12).path(), "/product/12");
        assert_eq!(NavTarget::AddProduct.to_string(), "/add-product");
    }
}
