//! Vizij Carousel Core (renderer-agnostic)
//!
//! Geometry and motion math for a draggable, loopable, snap-to-slide track.
//! Nothing here touches a renderer: adapters (web/wasm) feed measured
//! geometry in as a [`SnapModel`], drive the interaction, and apply the
//! transform/transition strings this crate produces.
//!
//! Per-frame functions are total. They never panic or return errors for
//! edge-of-domain input (empty snap sets, zero spacing, NaN/Infinity);
//! fallible APIs exist only at parse/validation boundaries.

pub mod anchor;
pub mod carousel;
pub mod config;
pub mod error;
pub mod looping;
pub mod model;
pub mod observer;
pub mod snap;
pub mod style;

// Re-exports for consumers (adapters)
pub use anchor::compute_anchor_lock;
pub use carousel::{Carousel, TrackStyle};
pub use config::CarouselConfig;
pub use error::CarouselError;
pub use looping::normalize_loop;
pub use model::{Axis, SnapModel};
pub use observer::{
    is_settle_event, ElementRef, MergedRef, RefSink, SettleCallback, TransitionEnd,
    TransitionHandler, TransitionObserver, TransitionTarget, TRANSFORM_PROPERTY,
};
pub use snap::{resolve_snap_target, resolve_snap_target_sorted};
pub use style::{compute_transform, compute_transition, format_number};
