//! Model persistence.
//!
//! Two formats are supported:
//!
//! - **Native binary** ([`native`]): 32-byte header + postcard payload,
//!   checksummed with CRC32. This is what [`RegressionModel::save`] and
//!   [`RegressionModel::load`] use.
//! - **JSON**: the same payload in a `{"format", "version", "model"}`
//!   envelope, for human inspection and diffing.
//!
//! Both round trip bit-exactly. Loading never trusts the artifact: shape,
//! checksum and finiteness are verified before a model is returned, and any
//! failure is reported as [`Error::CorruptArtifact`](crate::Error::CorruptArtifact).
//!
//! [`RegressionModel::save`]: crate::model::RegressionModel::save
//! [`RegressionModel::load`]: crate::model::RegressionModel::load

mod convert;
pub mod native;

pub use convert::{inspect, Payload, JSON_FORMAT};
pub use native::{FormatFlags, FormatHeader, NativeCodec};
