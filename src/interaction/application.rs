//! Focus adapter between the plot surface and the synthetic "application" node.
//!
//! Virtual focus inside vector graphics is poorly supported by assistive
//! technology, so the highlighted element's role and ARIA attributes are
//! copied onto a real focusable node. Only one of the plot and the application
//! node is reachable by Tab at any time.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FocusTarget {
    Plot,
    Application,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusOptions {
    pub prevent_scroll: bool,
}

/// Platform side of focus management, implemented by the embedding UI layer.
pub trait FocusHost {
    fn focus(&mut self, target: FocusTarget, options: FocusOptions);

    /// Detaches and re-inserts the application node so assistive technology
    /// treats it as new content.
    fn reattach_application(&mut self);
}

/// Headless host that only records requests; used by tests and servers.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NullFocusHost {
    pub focus_requests: Vec<FocusTarget>,
    pub reattach_count: usize,
}

impl NullFocusHost {
    #[must_use]
    pub fn last_focus(&self) -> Option<FocusTarget> {
        self.focus_requests.last().copied()
    }
}

impl FocusHost for NullFocusHost {
    fn focus(&mut self, target: FocusTarget, _options: FocusOptions) {
        self.focus_requests.push(target);
    }

    fn reattach_application(&mut self) {
        self.reattach_count += 1;
    }
}

/// Ordered `role` / `aria-*` attribute set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AriaAttributes(IndexMap<String, String>);

impl AriaAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn transferable(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(name, _)| name.as_str() == "role" || name.starts_with("aria-"))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationNode {
    pub attributes: AriaAttributes,
    pub tab_index: i32,
    pub aria_hidden: bool,
}

impl ApplicationNode {
    fn muted() -> Self {
        Self {
            attributes: AriaAttributes::default(),
            tab_index: -1,
            aria_hidden: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationController {
    node: ApplicationNode,
    focused: bool,
}

impl Default for ApplicationController {
    fn default() -> Self {
        Self {
            node: ApplicationNode::muted(),
            focused: false,
        }
    }
}

impl ApplicationController {
    #[must_use]
    pub fn node(&self) -> &ApplicationNode {
        &self.node
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Tab index of the plot surface: unreachable while the application node has focus.
    #[must_use]
    pub fn plot_tab_index(&self) -> i32 {
        if self.focused { -1 } else { 0 }
    }

    /// Mirrors `active` onto the application node and focuses it.
    ///
    /// When the node already has focus and the mirrored attributes change, the
    /// node is reattached first.
    pub fn focus<H: FocusHost>(&mut self, host: &mut H, active: &AriaAttributes) {
        let attributes = active.transferable();
        if self.focused {
            if self.node.attributes == attributes {
                return;
            }
            host.reattach_application();
        }

        self.node = ApplicationNode {
            attributes,
            tab_index: 0,
            aria_hidden: false,
        };
        self.focused = true;
        host.focus(
            FocusTarget::Application,
            FocusOptions {
                prevent_scroll: true,
            },
        );
    }

    /// Strips mirrored attributes and removes the node from the Tab order.
    pub fn mute(&mut self) {
        self.node = ApplicationNode::muted();
        self.focused = false;
    }
}
