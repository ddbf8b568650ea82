//! Overlay layout and interaction engine for composing marketing images.
//!
//! An overlay is a stack of text, picture and rectangle layers positioned over
//! a base photo. Layers are placed by anchor + margins in *design space* (the
//! canonical export resolution of the selected output format) and drawn in a
//! resizable *preview space*. This crate owns the math between the two, the
//! pointer gestures that edit layers, the z-ordered layer stack, and the merge
//! used when a template is applied onto an existing design. The host UI wires
//! DOM events into [`editor::EditorCore`] and persists the resulting
//! [`editor::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Host-facing engine: pointer events in, actions out |
//! | [`model`] | Overlay items, wire format, sparse patches |
//! | [`geom`] | Points, boxes, per-axis scale, output formats |
//! | [`layout`] | Anchor + margins to preview placement, and back |
//! | [`drag`] | Move gesture |
//! | [`resize`] | Resize gesture with anchor compensation |
//! | [`rotate`] | Rotate gesture and angle normalization |
//! | [`gesture`] | Pointer input types and the gesture state machine |
//! | [`stack`] | Display-order layer stack and z renumbering |
//! | [`zorder`] | Shared z allocation policy |
//! | [`merge`] | Template overlay merge |
//! | [`factory`] | Default layers, id generation, tier limits |
//! | [`selection`] | Shared active-layer handle |
//! | [`session`] | Design session: overlay plus base image |
//! | [`services`] | Async apply/bake/export flows and the HTTP client |
//! | [`config`] | Environment configuration |
//! | [`consts`] | Shared numeric constants |

pub mod config;
pub mod consts;
pub mod drag;
pub mod editor;
pub mod factory;
pub mod geom;
pub mod gesture;
pub mod layout;
pub mod merge;
pub mod model;
pub mod resize;
pub mod rotate;
pub mod selection;
pub mod services;
pub mod session;
pub mod stack;
pub mod zorder;
