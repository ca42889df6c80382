//! Fitness-club roster: regular and premium members, their attendance and
//! payments, and the flat text files the roster is loaded from and written to.

pub mod adapters;
pub mod commands;
pub mod config;
pub mod domain;
pub mod formats;
pub mod ports;
