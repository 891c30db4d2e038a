use ratatui::style::Color;

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Background colors
    pub background: ColorSpec,
    pub surface: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,
    pub info: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// RGB color.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

impl Theme {
    /// Theme matching the dark-mode flag.
    ///
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Theme::dark()
        } else {
            Theme::light()
        }
    }

    /// Light theme.
    ///
    pub fn light() -> Self {
        Theme {
            name: "light".to_string(),
            primary: ColorSpec::new(79, 70, 229),  // Indigo
            banner: ColorSpec::new(79, 70, 229),   // Indigo
            text: ColorSpec::new(31, 41, 55),      // Gray 800
            text_muted: ColorSpec::new(107, 114, 128),
            background: ColorSpec::new(249, 250, 251),
            surface: ColorSpec::new(255, 255, 255),
            success: ColorSpec::new(22, 163, 74),
            warning: ColorSpec::new(217, 119, 6),
            error: ColorSpec::new(220, 38, 38),
            info: ColorSpec::new(37, 99, 235),
            border_active: ColorSpec::new(79, 70, 229),
            border_normal: ColorSpec::new(209, 213, 219),
            highlight_bg: ColorSpec::new(224, 231, 255),
            highlight_fg: ColorSpec::new(49, 46, 129),
        }
    }

    /// Dark theme.
    ///
    pub fn dark() -> Self {
        Theme {
            name: "dark".to_string(),
            primary: ColorSpec::new(129, 140, 248), // Indigo 400
            banner: ColorSpec::new(129, 140, 248),
            text: ColorSpec::new(229, 231, 235),
            text_muted: ColorSpec::new(156, 163, 175),
            background: ColorSpec::new(17, 24, 39),
            surface: ColorSpec::new(31, 41, 55),
            success: ColorSpec::new(74, 222, 128),
            warning: ColorSpec::new(251, 191, 36),
            error: ColorSpec::new(248, 113, 113),
            info: ColorSpec::new(96, 165, 250),
            border_active: ColorSpec::new(129, 140, 248),
            border_normal: ColorSpec::new(75, 85, 99),
            highlight_bg: ColorSpec::new(55, 48, 163),
            highlight_fg: ColorSpec::new(238, 242, 255),
        }
    }
}
