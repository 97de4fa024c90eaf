//! Convenient imports for dynscope.
//!
//! ```ignore
//! use dynscope::prelude::*;
//!
//! let depth = make_parameter(0u32)?;
//! parameterize([(&depth, 1)], || depth.get())?;
//! ```

// Construction and identity
pub use crate::{is_parameter, make_parameter, make_parameter_with, Parameter};

// Guards
pub use crate::{Guard, ValidationError};

// Scoping
pub use crate::{parameterize, parameterize_async, try_parameterize, Binding, ScopeFrame};

// Error handling
pub use crate::{Error, Result};
