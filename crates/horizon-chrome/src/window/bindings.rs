//! Region action bindings.
//!
//! What a gesture does depends on the region it lands on and the button
//! used. The mapping is a plain table so applications can add, remove or
//! replace entries without touching the dispatcher.
//!
//! | region       | gesture      | button | action                               |
//! |--------------|--------------|--------|--------------------------------------|
//! | close        | click        | left   | close                                |
//! | minimize     | click        | left   | minimize                             |
//! | maximize     | click        | left   | toggle maximize                      |
//! | system menu  | press        | left   | system menu at the region's corner   |
//! | system menu  | click        | right  | system menu at the pointer           |
//! | system menu  | double-click | left   | close                                |
//! | caption      | click        | right  | system menu at the pointer           |

use horizon_chrome_core::{MouseButton, RegionId};

/// Pointer gesture a binding reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Button down over the region.
    Press,
    /// Button down and up over the same region.
    Click,
    /// Double-click over the region.
    DoubleClick,
}

/// Where the system menu opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAnchor {
    /// Bottom-left corner of the region that was hit.
    RegionBottomLeft,
    /// The pointer position.
    Pointer,
}

/// Something a region does when a bound gesture lands on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionAction {
    /// Close the window.
    Close,
    /// Minimize the window.
    Minimize,
    /// Maximize, or restore if already maximized.
    ToggleMaximize,
    /// Show the native system menu.
    ShowSystemMenu(MenuAnchor),
}

/// A single table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    pub region: RegionId,
    pub gesture: Gesture,
    pub button: MouseButton,
    pub action: RegionAction,
}

/// Table of region action bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTable {
    bindings: Vec<Binding>,
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl BindingTable {
    /// A table with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// The standard caption bindings.
    pub fn standard() -> Self {
        use Gesture::*;
        use MouseButton::{Left, Right};

        Self::empty()
            .with_binding(RegionId::Close, Click, Left, RegionAction::Close)
            .with_binding(RegionId::Minimize, Click, Left, RegionAction::Minimize)
            .with_binding(RegionId::Maximize, Click, Left, RegionAction::ToggleMaximize)
            .with_binding(
                RegionId::SystemMenu,
                Press,
                Left,
                RegionAction::ShowSystemMenu(MenuAnchor::RegionBottomLeft),
            )
            .with_binding(
                RegionId::SystemMenu,
                Click,
                Right,
                RegionAction::ShowSystemMenu(MenuAnchor::Pointer),
            )
            .with_binding(RegionId::SystemMenu, DoubleClick, Left, RegionAction::Close)
            .with_binding(
                RegionId::Caption,
                Click,
                Right,
                RegionAction::ShowSystemMenu(MenuAnchor::Pointer),
            )
    }

    /// Add or replace a binding (builder form).
    pub fn with_binding(
        mut self,
        region: RegionId,
        gesture: Gesture,
        button: MouseButton,
        action: RegionAction,
    ) -> Self {
        self.bind(region, gesture, button, action);
        self
    }

    /// Add a binding, replacing any existing one for the same key.
    pub fn bind(
        &mut self,
        region: RegionId,
        gesture: Gesture,
        button: MouseButton,
        action: RegionAction,
    ) {
        let binding = Binding {
            region,
            gesture,
            button,
            action,
        };
        match self.position(region, gesture, button) {
            Some(index) => self.bindings[index] = binding,
            None => self.bindings.push(binding),
        }
    }

    /// Remove a binding, returning its action.
    pub fn unbind(
        &mut self,
        region: RegionId,
        gesture: Gesture,
        button: MouseButton,
    ) -> Option<RegionAction> {
        let index = self.position(region, gesture, button)?;
        Some(self.bindings.remove(index).action)
    }

    /// The action bound to a gesture.
    pub fn lookup(
        &self,
        region: RegionId,
        gesture: Gesture,
        button: MouseButton,
    ) -> Option<RegionAction> {
        self.position(region, gesture, button)
            .map(|index| self.bindings[index].action)
    }

    /// All bindings.
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn position(&self, region: RegionId, gesture: Gesture, button: MouseButton) -> Option<usize> {
        self.bindings.iter().position(|binding| {
            binding.region == region && binding.gesture == gesture && binding.button == button
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = BindingTable::standard();
        assert_eq!(table.len(), 7);
        assert_eq!(
            table.lookup(RegionId::Close, Gesture::Click, MouseButton::Left),
            Some(RegionAction::Close)
        );
        assert_eq!(
            table.lookup(RegionId::Close, Gesture::Click, MouseButton::Right),
            None
        );
        assert_eq!(
            table.lookup(RegionId::SystemMenu, Gesture::Press, MouseButton::Left),
            Some(RegionAction::ShowSystemMenu(MenuAnchor::RegionBottomLeft))
        );
        assert_eq!(
            table.lookup(RegionId::Caption, Gesture::Click, MouseButton::Left),
            None
        );
        assert_eq!(
            table.lookup(RegionId::Caption, Gesture::Click, MouseButton::Right),
            Some(RegionAction::ShowSystemMenu(MenuAnchor::Pointer))
        );
    }

    #[test]
    fn test_bind_replaces() {
        let mut table = BindingTable::standard();
        table.bind(
            RegionId::Close,
            Gesture::Click,
            MouseButton::Left,
            RegionAction::Minimize,
        );
        assert_eq!(table.len(), 7);
        assert_eq!(
            table.lookup(RegionId::Close, Gesture::Click, MouseButton::Left),
            Some(RegionAction::Minimize)
        );
    }

    #[test]
    fn test_unbind() {
        let mut table = BindingTable::standard();
        let removed = table.unbind(RegionId::SystemMenu, Gesture::DoubleClick, MouseButton::Left);
        assert_eq!(removed, Some(RegionAction::Close));
        assert_eq!(
            table.lookup(RegionId::SystemMenu, Gesture::DoubleClick, MouseButton::Left),
            None
        );
        assert_eq!(
            table.unbind(RegionId::SystemMenu, Gesture::DoubleClick, MouseButton::Left),
            None
        );
    }

    #[test]
    fn test_empty() {
        let table = BindingTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
    }
}
