use eframe::egui::Visuals;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Icon of the theme a click switches to.
    #[must_use]
    pub fn switch_icon(self) -> &'static str {
        match self {
            Theme::Dark => egui_phosphor::regular::SUN,
            Theme::Light => egui_phosphor::regular::MOON,
        }
    }

    #[must_use]
    pub fn switch_hover_text(self) -> &'static str {
        match self {
            Theme::Dark => "Switch to light mode",
            Theme::Light => "Switch to dark mode",
        }
    }
}

impl From<Theme> for Visuals {
    fn from(value: Theme) -> Self {
        match value {
            Theme::Light => Visuals::light(),
            Theme::Dark => Visuals::dark(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_back_and_forth() {
        assert_eq!(Theme::default().toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert!(Visuals::from(Theme::Dark).dark_mode);
        assert!(!Visuals::from(Theme::Light).dark_mode);
    }
}
