pub const ALL_CATEGORIES: &str = "all";
pub const SHOW_DELAY_MS: u32 = 10;
pub const HIDE_DELAY_MS: u32 = 300;

pub type StylePatch = &'static [(&'static str, &'static str)];

pub fn matches_category(selected: &str, item_category: Option<&str>) -> bool {
    selected == ALL_CATEGORIES || item_category == Some(selected)
}

pub fn button_active(selected: &str, button_category: Option<&str>) -> bool {
    button_category == Some(selected)
}

/// Two-phase style change for one project item.
///
/// `display` flips before the fade when showing and after it when hiding, so
/// the transition is visible in both directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemTransition {
    Show,
    Hide,
}

impl ItemTransition {
    pub fn for_item(selected: &str, item_category: Option<&str>) -> Self {
        if matches_category(selected, item_category) {
            Self::Show
        } else {
            Self::Hide
        }
    }

    pub fn immediate(self) -> StylePatch {
        match self {
            Self::Show => &[("display", "block")],
            Self::Hide => &[("opacity", "0"), ("transform", "scale(0.8)")],
        }
    }

    pub fn deferred(self) -> (u32, StylePatch) {
        match self {
            Self::Show => (SHOW_DELAY_MS, &[("opacity", "1"), ("transform", "scale(1)")]),
            Self::Hide => (HIDE_DELAY_MS, &[("display", "none")]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: [Option<&str>; 4] = [Some("web"), Some("ml"), Some("web"), None];

    fn final_display(transition: ItemTransition) -> &'static str {
        let mut display = "block";
        for patch in [transition.immediate(), transition.deferred().1] {
            for &(property, value) in patch {
                if property == "display" {
                    display = value;
                }
            }
        }
        display
    }

    #[test]
    fn all_shows_every_item() {
        for item in ITEMS {
            let transition = ItemTransition::for_item(ALL_CATEGORIES, item);
            assert_eq!(transition, ItemTransition::Show);
            assert_eq!(final_display(transition), "block");
        }
    }

    #[test]
    fn specific_category_leaves_only_matches_visible() {
        let visible: Vec<bool> = ITEMS
            .iter()
            .map(|item| final_display(ItemTransition::for_item("web", *item)) == "block")
            .collect();

        assert_eq!(visible, vec![true, false, true, false]);
    }

    #[test]
    fn show_waits_briefly_and_hide_waits_for_fade() {
        assert_eq!(ItemTransition::Show.deferred().0, 10);
        assert_eq!(ItemTransition::Hide.deferred().0, 300);
        assert_eq!(ItemTransition::Show.immediate(), &[("display", "block")]);
    }

    #[test]
    fn only_matching_button_is_active() {
        assert!(button_active("web", Some("web")));
        assert!(!button_active("web", Some("all")));
        assert!(!button_active("all", None));
        assert!(button_active("all", Some("all")));
    }
}
