//! Backend bridge: command queue types and the worker thread that runs proposal requests.

pub mod commands;
pub mod runtime;
