//! # Settings
//!
//! A small language for describing how a configurable object is built.
//!
//! * [`Argument`]: a typed, bounded value cell.
//! * [`Context`]: an ordered set of named arguments.
//! * [`Group`] / [`GroupOption`]: alternative input shapes merging into one
//!   shared schema.
//! * [`Node`]: arguments plus embedded groups plus a constructor.
//! * [`Builder`]: the named nodes for one constructible type.
//!
//! Templates are built once and cloned per execution.
//!
//! ```rust
//! use gap_settings::{Argument, Builder, Node};
//!
//! let builder = Builder::new("square")
//!     .with_nodes([Node::new("basic")
//!         .argument("size", Argument::integer(1..=64))?
//!         .constructs(|ctx| ctx.get::<i32>("size"))])?;
//!
//! let mut filled = builder.clone();
//! filled.set_value("basic", "size", 8)?;
//! assert_eq!(filled.execute("basic", &[])?, 8);
//! # Ok::<(), gap_settings::SettingsError>(())
//! ```

pub mod argument;
mod builder;
mod context;
mod error;
mod group;
mod node;
mod value;

pub use argument::{Argument, ArgumentKind};
pub use builder::Builder;
pub use context::Context;
pub use error::{SettingsError, SettingsErrorExt};
pub use group::{Group, GroupOption, MergeFn};
pub use node::{Constructor, EMPTY_NODE, Node};
pub use value::{FromValue, Value};
