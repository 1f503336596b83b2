//! Sensor protocol drivers
//!
//! This crate provides concrete implementations of the sensor traits
//! defined in watchpost-core, written against the watchpost-hal pin and
//! clock traits:
//!
//! - Motion detection (PIR edge detector with debounce)
//! - Ranging (HC-SR04 ultrasonic pulse timing)
//! - Climate (DHT11 single-wire temperature and humidity)
//!
//! All three protocols busy-poll GPIO against a microsecond clock; the
//! shared helpers live in [`timing`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod climate;
pub mod motion;
pub mod ranging;
pub mod timing;

#[cfg(test)]
mod sim;
