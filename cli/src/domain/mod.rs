//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod report;
pub mod spec;
pub mod unit;

pub use config::{FleetFile, PortsField, SpecOverrides, build_spec, build_target, resolve_unit_dir};
pub use error::{
    ApplyError, DecommissionError, RenderError, ServiceManagerError, ValidationError, WriteError,
};
pub use report::{
    ApplyReport, DecommissionReport, DefinitionOutcome, Outcome, PortReport, RemovalOutcome,
    RemovalReport, StepOutcome, UnitStatus,
};
pub use spec::{RestartPolicy, ServiceSpec, ValidatedSpec, parse_port_list};
pub use unit::{ServiceUnit, UnitState, render};
