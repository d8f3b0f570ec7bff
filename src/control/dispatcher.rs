//! Command dispatcher - consumer-control usages onto the HID link.
//!
//! Every command is a momentary press: the usage report, then the release
//! report, back to back on the same link. Receivers latch on the non-zero
//! value, so the release must follow even though only the press decides
//! the outcome.

use crate::error::{Delivery, Error, LinkError};
use crate::hid::{ConsumerReport, ConsumerUsage, CONSUMER_REPORT_SIZE};

/// The two things the panel needs from the wireless stack.
pub trait HidLink {
    /// Whether a host is connected right now.
    fn is_connected(&self) -> bool;

    /// Send one input report.
    fn transmit(&mut self, report: [u8; CONSUMER_REPORT_SIZE]) -> Result<(), LinkError>;
}

impl<L: HidLink + ?Sized> HidLink for &mut L {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn transmit(&mut self, report: [u8; CONSUMER_REPORT_SIZE]) -> Result<(), LinkError> {
        (**self).transmit(report)
    }
}

pub struct CommandDispatcher<L> {
    link: L,
}

impl<L: HidLink> CommandDispatcher<L> {
    pub const fn new(link: L) -> Self {
        Self { link }
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn is_link_connected(&self) -> bool {
        self.link.is_connected()
    }

    /// Play when `playing`, otherwise Pause.
    pub fn send_play_pause(&mut self, playing: bool) -> Result<Delivery, Error> {
        self.send(ConsumerUsage::play_pause(playing))
    }

    pub fn send(&mut self, usage: ConsumerUsage) -> Result<Delivery, Error> {
        self.send_usage(usage.code())
    }

    /// Press `code`, then release.
    ///
    /// - no link: `Ok(Delivery::NotConnected)`, nothing transmitted
    /// - press fails: `Err`, release skipped
    /// - release fails: logged, still `Ok(Delivery::Sent)`
    pub fn send_usage(&mut self, code: u16) -> Result<Delivery, Error> {
        if !self.link.is_connected() {
            debug!("hid: no link, usage {=u16:#x} not sent", code);
            return Ok(Delivery::NotConnected);
        }

        match self.link.transmit(ConsumerReport::from_code(code).to_bytes()) {
            Ok(()) => {}
            // Link dropped between the query and the send.
            Err(LinkError::NotConnected) => return Ok(Delivery::NotConnected),
            Err(LinkError::Transport(e)) => return Err(Error::Transport(e)),
        }

        if let Err(e) = self.link.transmit(ConsumerReport::release().to_bytes()) {
            warn!("hid: release after {=u16:#x} failed: {}", code, e);
        }

        Ok(Delivery::Sent)
    }
}
