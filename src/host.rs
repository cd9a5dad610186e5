//! The firmware's dialog host.

use dialogs_pico2::dialog::{Host, Overlay, OverlayStack};
use dialogs_pico2::input::{EventBus, Scope};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Delay;

/// Scope of every button event on the device; there is a single host.
pub const HOME_SCOPE: Scope = Scope(0);

/// Host owning the overlay stack, fed by the static button bus.
pub struct DeviceHost<'a> {
    bus: &'static EventBus<CriticalSectionRawMutex>,
    overlays: OverlayStack<'a>,
}

impl<'a> DeviceHost<'a> {
    pub const fn new(bus: &'static EventBus<CriticalSectionRawMutex>) -> Self {
        Self {
            bus,
            overlays: OverlayStack::new(),
        }
    }

    pub const fn overlays(&self) -> &OverlayStack<'a> { &self.overlays }
}

impl<'a> Host<'a> for DeviceHost<'a> {
    type Delay = Delay;
    type Mutex = CriticalSectionRawMutex;

    fn scope(&self) -> Scope { HOME_SCOPE }

    fn bus(&self) -> &EventBus<CriticalSectionRawMutex> { self.bus }

    fn delay(&self) -> Delay { Delay }

    fn push_overlay(
        &self,
        overlay: &'a dyn Overlay,
    ) {
        self.overlays.push(overlay);
    }

    fn pop_overlay(&self) { self.overlays.pop(); }
}
