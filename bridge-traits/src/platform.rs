//! Platform-conditional marker traits.
//!
//! Native targets run the bridge on a multi-threaded runtime, so every
//! capability object must be `Send + Sync`. `wasm32` is single-threaded and
//! the browser types are `!Send`; the markers collapse to no-ops there so
//! the same trait definitions compile on both targets.

// ============================================================================
// Native markers
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSendSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync + ?Sized> PlatformSendSync for T {}

#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSend: Send {}

#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + ?Sized> PlatformSend for T {}

// ============================================================================
// WASM markers
// ============================================================================

#[cfg(target_arch = "wasm32")]
pub trait PlatformSendSync {}

#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> PlatformSendSync for T {}

#[cfg(target_arch = "wasm32")]
pub trait PlatformSend {}

#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> PlatformSend for T {}
