// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Scroll-synchronized camera sequencing for render-on-demand 3D viewers.
//!
//! Scrollcam binds a viewer's camera pose to page scroll position: each
//! page section declares camera-position and camera-target keyframe steps,
//! and a render-invalidation bridge makes every pose change visible to the
//! viewer's frame loop exactly once per frame.
//!
//! # Key entry points
//!
//! - [`engine::ScrollEngine`] - wires viewer, timeline, bridge and buttons
//! - [`animation::Timeline`] - the scroll-driven keyframe sequencer
//! - [`bridge::RenderInvalidationBridge`] - dirty-flag bridge to the frame
//!   loop
//! - [`viewer::ViewerRuntime`] - the viewer contract the core consumes
//! - [`options::Options`] - TOML page/timeline/viewer configuration
//!
//! # Architecture
//!
//! Everything runs on one thread. Scroll events drive
//! [`animation::Timeline::scroll`], which folds every step into the camera
//! pose and notifies each step's `on_applied` observer. The default observer
//! marks the bridge's [`bridge::DirtyFlag`]. Once per frame the viewer runs
//! its pre-frame listeners; the bridge consumes the flag, pushes the pose
//! into the camera transform, resets shadows and requests a render.

pub mod animation;
pub mod bridge;
pub mod camera;
pub mod engine;
pub mod error;
pub mod options;
pub mod scroll;
pub mod util;
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use engine::ScrollEngine;
pub use error::ScrollError;
