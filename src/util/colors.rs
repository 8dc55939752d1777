use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x0062d6a8);
pub const SECONDARY: Color = Color::from_u32(0x002e8b6d);
pub const NEUTRAL: Color = Color::from_u32(0x00404040);
pub const BACKGROUND: Color = Color::from_u32(0x000d0d0d);
pub const ACCENT: Color = Color::from_u32(0x00f0c987);
pub const ERROR: Color = Color::from_u32(0x00e06c75);
