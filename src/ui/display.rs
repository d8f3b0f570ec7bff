//! SSD1306 OLED renderer for the music panel.
//!
//! Layout on the 128×64 panel (FONT_6X10):
//!
//! ```text
//!   y=10  Track Two            [VOL+]
//!   y=22  Echo Harbor
//!   y=36  0:42                   2:29
//!   y=40  [██████████░░░░░░░░░░░░░░]
//!   y=60  |<         ||          >|
//! ```
//!
//! The panel writes into [`OledView`] through [`PanelView`]; nothing is
//! drawn until [`OledView::render`] flushes the changes.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::config::{DISPLAY_WIDTH_PX, PROGRESS_MAX};
use crate::control::Track;
use crate::error::Error;
use crate::panel::PanelView;
use crate::ui::format::{time_label, TimeLabel};

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Monochrome panel: the labels are drawn while at least half opaque.
const TEXT_VISIBLE_OPA: u8 = 128;

const CHAR_W: i32 = 6;
const WIDTH: i32 = DISPLAY_WIDTH_PX as i32;

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

fn inverted_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::Off)
        .build()
}

/// Retained panel state plus the driver it renders to.
pub struct OledView<I2C> {
    display: Display<I2C>,
    track: Option<Track>,
    text_opa: u8,
    percent: u8,
    elapsed: TimeLabel,
    playing: bool,
    controls_enabled: bool,
    overlay: Option<char>,
    dirty: bool,
}

impl<I2C> OledView<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the SSD1306 and clear the screen.
    pub fn new(i2c: I2C) -> Result<Self, Error> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init().map_err(|_| Error::Display)?;
        display.clear_buffer();
        display.flush().map_err(|_| Error::Display)?;

        Ok(Self {
            display,
            track: None,
            text_opa: 0,
            percent: 0,
            elapsed: time_label(0),
            playing: false,
            controls_enabled: false,
            overlay: None,
            dirty: true,
        })
    }

    /// Redraw and flush if anything changed since the last call.
    pub fn render(&mut self) -> Result<(), Error> {
        if !self.dirty {
            return Ok(());
        }
        self.dirty = false;

        self.display.clear_buffer();
        self.draw_labels();
        self.draw_progress();
        self.draw_controls();
        self.draw_overlay();
        self.display.flush().map_err(|_| Error::Display)
    }

    fn draw_labels(&mut self) {
        let Some(track) = self.track else {
            return;
        };
        if self.text_opa >= TEXT_VISIBLE_OPA {
            let _ = Text::new(track.title, Point::new(0, 10), text_style()).draw(&mut self.display);
            let _ =
                Text::new(track.artist, Point::new(0, 22), text_style()).draw(&mut self.display);
        }

        let _ = Text::new(self.elapsed.as_str(), Point::new(0, 36), text_style())
            .draw(&mut self.display);

        let duration = time_label(u32::from(track.duration_secs));
        let x = WIDTH - duration.len() as i32 * CHAR_W;
        let _ =
            Text::new(duration.as_str(), Point::new(x, 36), text_style()).draw(&mut self.display);
    }

    fn draw_progress(&mut self) {
        let _ = Rectangle::new(Point::new(0, 40), Size::new(DISPLAY_WIDTH_PX, 6))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.display);

        let inner = DISPLAY_WIDTH_PX - 2;
        let filled = inner * u32::from(self.percent) / u32::from(PROGRESS_MAX);
        if filled > 0 {
            let _ = Rectangle::new(Point::new(1, 41), Size::new(filled, 4))
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(&mut self.display);
        }
    }

    fn draw_controls(&mut self) {
        if !self.controls_enabled {
            let _ =
                Text::new("no host", Point::new(43, 60), text_style()).draw(&mut self.display);
            return;
        }

        let icon = if self.playing { "||" } else { ">" };
        let icon_x = (WIDTH - icon.len() as i32 * CHAR_W) / 2;
        let _ = Text::new("|<", Point::new(0, 60), text_style()).draw(&mut self.display);
        let _ = Text::new(icon, Point::new(icon_x, 60), text_style()).draw(&mut self.display);
        let _ = Text::new(">|", Point::new(WIDTH - 2 * CHAR_W, 60), text_style())
            .draw(&mut self.display);
    }

    fn draw_overlay(&mut self) {
        let Some(symbol) = self.overlay else {
            return;
        };

        let mut label: heapless::String<4> = heapless::String::new();
        let _ = label.push_str("VOL");
        let _ = label.push(symbol);

        let w = 4 * CHAR_W as u32 + 4;
        let x = WIDTH - w as i32;
        let _ = Rectangle::new(Point::new(x, 0), Size::new(w, 12))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut self.display);
        let _ = Text::new(label.as_str(), Point::new(x + 2, 9), inverted_style())
            .draw(&mut self.display);
    }
}

impl<I2C> PanelView for OledView<I2C> {
    // The firmware has a single screen that is never torn down.
    fn is_alive(&self) -> bool {
        true
    }

    fn show_track(&mut self, track: &Track) {
        self.track = Some(*track);
        self.dirty = true;
    }

    fn set_text_opacity(&mut self, opa: u8) {
        // Only crossing the threshold changes the picture.
        if (opa >= TEXT_VISIBLE_OPA) != (self.text_opa >= TEXT_VISIBLE_OPA) {
            self.dirty = true;
        }
        self.text_opa = opa;
    }

    fn set_progress(&mut self, percent: u8, elapsed: &str) {
        if self.percent != percent || self.elapsed.as_str() != elapsed {
            self.percent = percent.min(PROGRESS_MAX);
            self.elapsed.clear();
            let _ = self.elapsed.push_str(elapsed);
            self.dirty = true;
        }
    }

    fn set_play_icon(&mut self, playing: bool) {
        if self.playing != playing {
            self.playing = playing;
            self.dirty = true;
        }
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        if self.controls_enabled != enabled {
            self.controls_enabled = enabled;
            self.dirty = true;
        }
    }

    fn show_volume_overlay(&mut self, symbol: char) {
        if self.overlay != Some(symbol) {
            self.overlay = Some(symbol);
            self.dirty = true;
        }
    }

    fn hide_volume_overlay(&mut self) {
        if self.overlay.take().is_some() {
            self.dirty = true;
        }
    }
}
