//! # Theme
//!
//! Immutable style set handed to every render call. Built once at startup
//! from `[theme]` in the config; unset or unparsable entries keep the retro
//! VT100 palette.

use std::str::FromStr;

use log::warn;
use ratatui::style::{Color, Modifier, Style};

use crate::core::config::ThemeConfig;
use crate::core::message::Origin;

const CYAN: Color = Color::Rgb(0x00, 0xff, 0xff);
const MAGENTA: Color = Color::Rgb(0xff, 0x00, 0xff);
const GREEN: Color = Color::Rgb(0x00, 0xff, 0x00);
const DARK_CYAN: Color = Color::Rgb(0x00, 0x8b, 0x8b);
const GRAY: Color = Color::Rgb(0x80, 0x80, 0x80);
const WHITE: Color = Color::Rgb(0xff, 0xff, 0xff);

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub title: Style,
    pub status: Style,
    pub timestamp: Style,
    pub local_sender: Style,
    pub remote_sender: Style,
    pub message: Style,
    pub border: Style,
    pub input_label: Style,
    pub hint: Style,
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        let title = color(&config.title, CYAN);
        let title_bg = color(&config.title_bg, DARK_CYAN);
        let border = color(&config.border, CYAN);

        Self {
            title: Style::default()
                .fg(title)
                .bg(title_bg)
                .add_modifier(Modifier::BOLD),
            status: Style::default()
                .fg(color(&config.status, MAGENTA))
                .add_modifier(Modifier::ITALIC),
            timestamp: Style::default().fg(color(&config.timestamp, GRAY)),
            local_sender: Style::default()
                .fg(color(&config.local_sender, GREEN))
                .add_modifier(Modifier::BOLD),
            remote_sender: Style::default()
                .fg(color(&config.remote_sender, MAGENTA))
                .add_modifier(Modifier::BOLD),
            message: Style::default().fg(color(&config.message, WHITE)),
            border: Style::default().fg(border),
            input_label: Style::default().fg(border).add_modifier(Modifier::BOLD),
            hint: Style::default().fg(color(&config.hint, GRAY)),
            error: Style::default()
                .fg(color(&config.error, Color::Red))
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Sender-label emphasis by origin.
    pub fn sender(&self, origin: Origin) -> Style {
        match origin {
            Origin::Local => self.local_sender,
            Origin::Remote => self.remote_sender,
        }
    }
}

fn color(value: &Option<String>, fallback: Color) -> Color {
    let Some(name) = value else {
        return fallback;
    };
    Color::from_str(name.trim()).unwrap_or_else(|_| {
        warn!("Unknown theme colour {:?}, using default", name);
        fallback
    })
}
