//! SPI LCD display adapter.
//!
//! [`LcdDisplay`] owns the live bus and the panel driver. Construction runs
//! the panel bring-up; afterwards the adapter is the board's single
//! [`Display`] capability. Drawing goes straight to the panel through
//! [`DrawTarget`] when the panel driver supports it.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use platform::{
    Display, DisplayConfig, DisplayError, DisplayGeometry, DisplayPanel, Live, SharedBus, SpiBus,
};

use crate::log;

/// Display on an SPI panel (ST7789 on the SuperMini).
pub struct LcdDisplay<B, P> {
    bus: SharedBus<B, Live>,
    panel: P,
    geometry: DisplayGeometry,
    power_save: bool,
}

impl<B: SpiBus, P: DisplayPanel<Bus = B>> LcdDisplay<B, P> {
    /// Bring up `panel` on `bus` and switch it on.
    ///
    /// Panel operations run in controller order: IO attach, driver install,
    /// reset, init, colour inversion, axis swap, mirroring, display on. The
    /// first failure aborts; nothing is retried.
    pub fn new(
        mut bus: SharedBus<B, Live>,
        mut panel: P,
        config: &DisplayConfig,
    ) -> Result<Self, DisplayError> {
        let geometry = config.geometry;

        panel
            .attach_io(bus.driver_mut(), &config.io)
            .map_err(|_| fail("panel IO", DisplayError::Io))?;
        panel
            .install(config.rgb_order, config.bits_per_pixel)
            .map_err(|_| fail("driver install", DisplayError::Install))?;
        panel.reset().map_err(|_| fail("reset", DisplayError::Init))?;
        panel.init().map_err(|_| fail("init", DisplayError::Init))?;
        panel
            .invert_color(geometry.invert_color)
            .map_err(|_| fail("invert", DisplayError::Configure))?;
        panel
            .swap_xy(geometry.swap_xy)
            .map_err(|_| fail("swap", DisplayError::Configure))?;
        panel
            .mirror(geometry.mirror_x, geometry.mirror_y)
            .map_err(|_| fail("mirror", DisplayError::Configure))?;
        panel.display_on(true).map_err(|_| fail("display on", DisplayError::Power))?;

        log::info!("display: {}x{} ready", geometry.width, geometry.height);

        Ok(Self {
            bus,
            panel,
            geometry,
            power_save: false,
        })
    }
}

impl<B, P> LcdDisplay<B, P> {
    /// Panel driver
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// The bus the panel is attached to
    pub fn bus(&self) -> &SharedBus<B, Live> {
        &self.bus
    }
}

fn fail(step: &'static str, err: DisplayError) -> DisplayError {
    log::error!("display: {} failed", step);
    err
}

impl<B, P: DisplayPanel> Display for LcdDisplay<B, P> {
    fn set_power_save_mode(&mut self, on: bool) {
        match self.panel.display_on(!on) {
            Ok(()) => self.power_save = on,
            // Runtime degradation: the panel keeps its previous state.
            Err(_) => log::warn!("display: power save {} failed", on),
        }
    }

    fn is_power_save(&self) -> bool {
        self.power_save
    }

    fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }
}

impl<B, P: Dimensions> Dimensions for LcdDisplay<B, P> {
    fn bounding_box(&self) -> Rectangle {
        self.panel.bounding_box()
    }
}

impl<B, P: DrawTarget> DrawTarget for LcdDisplay<B, P> {
    type Color = P::Color;
    type Error = P::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.panel.draw_iter(pixels)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.panel.fill_solid(area, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.panel.clear(color)
    }
}
