//! Macros for user-facing output and logging.
//!
//! Every macro routes its message one of two ways:
//!
//! - **Debug mode** (`SHELTER_DEBUG` or `RUST_LOG` set): through `tracing`,
//!   so messages carry a level and a timestamp and go to stderr.
//! - **Normal mode**: plain `println!` / `eprintln!` with an emoji prefix.
//!
//! ```text
//! msg_info!(..) ──▶ is_debug_mode()? ──▶ tracing::info!(..)
//!                          │
//!                          └─────────▶ println!("ℹ️ ..")
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use shelter::{msg_info, msg_success, msg_error};
//! use shelter::libs::messages::Message;
//!
//! msg_success!(Message::ConfigSaved);
//! msg_info!(Message::AnimalsHeader, true);
//! msg_error!(Message::AnimalNotFound(7));
//! ```
//!
//! ```rust
//! use shelter::msg_bail_anyhow;
//! use shelter::libs::messages::Message;
//!
//! fn find(id: i64) -> anyhow::Result<()> {
//!     msg_bail_anyhow!(Message::AnimalNotFound(id));
//! }
//! ```

use std::sync::OnceLock;

/// Cached result of the environment check, see [`is_debug_mode`].
static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Whether output should go through `tracing`.
///
/// True when `SHELTER_DEBUG` or `RUST_LOG` is set. The environment is read
/// once per process.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("SHELTER_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Prints a message without prefix. Pass `true` as a second argument to
/// surround it with blank lines.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

/// Prints a success message with ✅ prefix.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n✅ {}\n", $msg);
        } else {
            println!("\n✅ {}\n", $msg);
        }
    };
}

/// Prints an error message with ❌ prefix to stderr.
///
/// Use it for failures that end the current command without being
/// propagated; propagated errors are built with [`msg_error_anyhow!`].
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("\n❌ {}\n", $msg);
        } else {
            eprintln!("\n❌ {}\n", $msg);
        }
    };
}

/// Prints a warning with ⚠️ prefix.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("\n⚠️ {}\n", $msg);
        } else {
            println!("\n⚠️ {}\n", $msg);
        }
    };
}

/// Prints an informational message with ℹ️ prefix.
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\nℹ️ {}\n", $msg);
        } else {
            println!("\nℹ️ {}\n", $msg);
        }
    };
}

/// Debug-only message with 🔍 prefix. Prints nothing in normal mode.
///
/// ```rust
/// use shelter::msg_debug;
///
/// let id = 42;
/// msg_debug!(format!("Inserted animal with id {}", id));
/// ```
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Builds an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

/// Returns early with an `anyhow::Error` built from a message.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
