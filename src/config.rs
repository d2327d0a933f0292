//! Chart layout and colours.
//!
//! The script variants only ever differed in these values, so they are plain
//! data with the original layout as the default.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::trend::Window;

/// Named CSS colours used by the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    SteelBlue,
    Orange,
    Red,
    LightBlue,
    DodgerBlue,
    DarkBlue,
}

impl Color {
    pub fn name(self) -> &'static str {
        match self {
            Self::SteelBlue => "steelblue",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::LightBlue => "lightblue",
            Self::DodgerBlue => "dodgerblue",
            Self::DarkBlue => "darkblue",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::SteelBlue => (70, 130, 180),
            Self::Orange => (255, 165, 0),
            Self::Red => (255, 0, 0),
            Self::LightBlue => (173, 216, 230),
            Self::DodgerBlue => (30, 144, 255),
            Self::DarkBlue => (0, 0, 139),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 50,
            right: 30,
            bottom: 60,
            left: 70,
        }
    }
}

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Empty plot area: {width}x{height} after margins")]
    #[diagnostic(
        code(weather_trend::config::empty_plot_area),
        help("make the chart larger or the margins smaller")
    )]
    EmptyPlotArea { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Outer size in pixels, margins included.
    pub width: u32,
    pub height: u32,
    pub margin: Margin,

    pub actual_color: Color,
    pub historical_color: Color,
    pub record_color: Color,
    pub bar_color: Color,

    pub trend_window: Window,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            margin: Margin::default(),
            actual_color: Color::SteelBlue,
            historical_color: Color::Orange,
            record_color: Color::Red,
            bar_color: Color::SteelBlue,
            trend_window: Window::DEFAULT,
        }
    }
}

impl ChartConfig {
    pub fn inner_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margin.left)
            .saturating_sub(self.margin.right)
    }

    pub fn inner_height(&self) -> u32 {
        self.height
            .saturating_sub(self.margin.top)
            .saturating_sub(self.margin.bottom)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.inner_width(), self.inner_height());
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyPlotArea { width, height });
        }
        Ok(())
    }
}
