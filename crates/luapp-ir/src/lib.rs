//! Lua++ IR construction: lowers a resolved syntax tree into function
//! prototypes (code, constants, nested closures) for the bytecode emitter.

pub mod collect;
pub mod config;
pub mod constant;
pub mod dump;
pub mod error;
pub mod logging;
pub mod lower;
pub mod opcode;
pub mod proto;
pub mod regalloc;
pub mod section;

pub use collect::{collect, number_protos};
pub use config::IrConfig;
pub use error::{BuildError, Diagnostics, IrError};
pub use lower::{build, build_with_config, IrBuilder};
pub use proto::Proto;
