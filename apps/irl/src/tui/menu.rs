//! Main screen menu.

/// What a menu entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Start the new-project wizard.
    NewProject,
    /// Start the adopt-folder wizard.
    AdoptFolder,
    Quit,
}

/// A menu entry with a shortcut key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub key: char,
    pub action: MenuAction,
}

impl MenuItem {
    const fn new(label: &'static str, key: char, action: MenuAction) -> Self {
        Self { label, key, action }
    }
}

pub const MENU_ITEMS: &[MenuItem] = &[
    MenuItem::new("New project", 'n', MenuAction::NewProject),
    MenuItem::new("Adopt folder", 'a', MenuAction::AdoptFolder),
    MenuItem::new("Quit", 'q', MenuAction::Quit),
];

/// Selection state with wrap-around navigation.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    selected: usize,
}

impl Menu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_item(&self) -> &'static MenuItem {
        &MENU_ITEMS[self.selected]
    }

    pub fn up(&mut self) {
        self.selected = self.selected.checked_sub(1).unwrap_or(MENU_ITEMS.len() - 1);
    }

    pub fn down(&mut self) {
        self.selected = (self.selected + 1) % MENU_ITEMS.len();
    }

    /// Finds an entry by shortcut key.
    #[must_use]
    pub fn find_by_key(key: char) -> Option<&'static MenuItem> {
        MENU_ITEMS.iter().find(|item| item.key == key)
    }
}
