//! flow-config: design descriptors for physical-design flows
//!
//! Loads and validates the per-design configuration a place-and-route flow
//! consumes: sources, clocking, process and cell library, floorplan, and
//! flow switches. The result is an immutable [`DesignConfiguration`], or a
//! [`Diagnostics`] batch listing every problem in the document.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod resolve;
pub mod utils;
pub mod validate;

pub use catalog::{ProcessCatalog, ProcessInfo};
pub use domain::{
    DesignConfiguration, DieArea, DiodeInsertion, FloorplanSizing, SynthObjective, SynthStrategy,
};
pub use error::{ConfigError, Diagnostics};
pub use resolve::{
    find_dangling_references, DanglingReference, FileProbe, FsProbe, MarkerResolver, PathResolver,
    DIR_MARKER,
};
pub use validate::{load, load_with_resolver, LoadOptions, UnknownKeyPolicy};
