//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for the paste-image shortcut
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const PASTE_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const PASTE_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Paste shortcut display for the status hints
#[cfg(target_os = "macos")]
pub const PASTE_HINT: &str = "Cmd+V:paste image";

#[cfg(not(target_os = "macos"))]
pub const PASTE_HINT: &str = "^V:paste image";
