//! USB Device subsystem - presents a CDC-ACM serial port to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`.  The device exposes one CDC-ACM interface on which the
//! per-cycle status line is printed, standing in for the link to the
//! collection central.
//!
//! Reports reach the USB task through a single-slot mailbox: a newer line
//! overwrites an unsent one, nothing is queued and nothing is retried.

pub mod serial;
